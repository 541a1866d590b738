//! Closed-form severity (PDI) estimators.
//!
//! Each disease has a fixed linear regression on mean relative humidity,
//! rainfall and minimum temperature. Results are rounded to two decimals and
//! floored at zero; there is no upper bound.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

pub const MEAN_RH_RANGE: RangeInclusive<f64> = 50.0..=100.0;
pub const RAINFALL_RANGE: RangeInclusive<f64> = 0.0..=200.0;
pub const MIN_TEMP_RANGE: RangeInclusive<f64> = 15.0..=30.0;

/// Weather conditions fed to the estimators.
///
/// The ranges above bound the UI controls only; the estimators accept any
/// finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherInputs {
    /// Mean relative humidity, %.
    pub mean_rh: f64,
    /// Rainfall, mm.
    pub rainfall: f64,
    /// Minimum temperature, °C.
    pub min_temp: f64,
}

impl Default for WeatherInputs {
    fn default() -> Self {
        WeatherInputs {
            mean_rh: 85.0,
            rainfall: 50.0,
            min_temp: 24.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Diseases and their coefficients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Disease {
    Anthracnose,
    #[serde(rename = "RAB")]
    RhizoctoniaAerialBlight,
    CharcoalRot,
    #[serde(rename = "YMV")]
    YellowMosaicVirus,
}

/// `intercept + rh·RH + rain·rainfall + temp·min_temp`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub intercept: f64,
    pub rh: f64,
    pub rain: f64,
    pub temp: f64,
}

impl Disease {
    pub const ALL: [Disease; 4] = [
        Disease::Anthracnose,
        Disease::RhizoctoniaAerialBlight,
        Disease::CharcoalRot,
        Disease::YellowMosaicVirus,
    ];

    pub fn coefficients(self) -> Coefficients {
        let (intercept, rh, rain, temp) = match self {
            Disease::Anthracnose => (-45.0, 0.4, -0.05, 1.2),
            Disease::RhizoctoniaAerialBlight => (-58.8, 0.433, -0.0498, 1.354),
            Disease::CharcoalRot => (-30.0, 0.35, -0.04, 1.0),
            Disease::YellowMosaicVirus => (-50.0, 0.38, -0.03, 1.1),
        };
        Coefficients {
            intercept,
            rh,
            rain,
            temp,
        }
    }

    /// Short label used in tables and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Disease::Anthracnose => "Anthracnose",
            Disease::RhizoctoniaAerialBlight => "RAB",
            Disease::CharcoalRot => "Charcoal Rot",
            Disease::YellowMosaicVirus => "YMV",
        }
    }

    /// Full name shown next to the metric.
    pub fn display_name(self) -> &'static str {
        match self {
            Disease::Anthracnose => "Anthracnose",
            Disease::RhizoctoniaAerialBlight => "Rhizoctonia Aerial Blight (RAB)",
            Disease::CharcoalRot => "Charcoal Rot",
            Disease::YellowMosaicVirus => "Yellow Mosaic Virus (YMV)",
        }
    }

    /// Predicted PDI for the given conditions.
    pub fn estimate(self, mean_rh: f64, rainfall: f64, min_temp: f64) -> f64 {
        let c = self.coefficients();
        clamp_pdi(c.intercept + c.rh * mean_rh + c.rain * rainfall + c.temp * min_temp)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Round to two decimals, then floor at zero. Never returns `-0.0`.
///
/// Rounding works on the exact binary value, not on `raw * 100`: a result
/// printed as `2.635` is stored just below the tie and becomes `2.63`.
fn clamp_pdi(raw: f64) -> f64 {
    let rounded = format!("{raw:.2}").parse::<f64>().unwrap_or(raw);
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

pub fn anthracnose(mean_rh: f64, rainfall: f64, min_temp: f64) -> f64 {
    Disease::Anthracnose.estimate(mean_rh, rainfall, min_temp)
}

pub fn rab(mean_rh: f64, rainfall: f64, min_temp: f64) -> f64 {
    Disease::RhizoctoniaAerialBlight.estimate(mean_rh, rainfall, min_temp)
}

pub fn charcoal_rot(mean_rh: f64, rainfall: f64, min_temp: f64) -> f64 {
    Disease::CharcoalRot.estimate(mean_rh, rainfall, min_temp)
}

pub fn ymv(mean_rh: f64, rainfall: f64, min_temp: f64) -> f64 {
    Disease::YellowMosaicVirus.estimate(mean_rh, rainfall, min_temp)
}

// ---------------------------------------------------------------------------
// SeverityReport – all four estimates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub disease: Disease,
    pub pdi: f64,
}

/// The four estimates for one set of inputs, in [`Disease::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityReport {
    pub inputs: WeatherInputs,
    pub estimates: [Estimate; 4],
}

impl SeverityReport {
    pub fn get(&self, disease: Disease) -> f64 {
        self.estimates
            .iter()
            .find(|e| e.disease == disease)
            .map_or(0.0, |e| e.pdi)
    }
}

pub fn estimate_all(inputs: WeatherInputs) -> SeverityReport {
    let WeatherInputs {
        mean_rh,
        rainfall,
        min_temp,
    } = inputs;
    SeverityReport {
        inputs,
        estimates: Disease::ALL.map(|disease| Estimate {
            disease,
            pdi: disease.estimate(mean_rh, rainfall, min_temp),
        }),
    }
}
