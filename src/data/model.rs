use serde::Serialize;

use super::variety::Variety;
use crate::error::UnknownVarietyError;

// ---------------------------------------------------------------------------
// Column names of the source sheet
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "Year";
pub const COL_SMW: &str = "SMW";
pub const COL_MAX_TEMP: &str = "Max_Temp";
pub const COL_MIN_TEMP: &str = "Min_Temp";
pub const COL_RAINFALL: &str = "Rainfall";
pub const COL_MAX_HUMIDITY: &str = "Max_Humidity";
pub const COL_MIN_HUMIDITY: &str = "Min_Humidity";
/// Derived at load time, never read from the file.
pub const COL_MEAN_RH: &str = "Mean_RH";

/// Columns every input file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_YEAR,
    COL_SMW,
    COL_MAX_TEMP,
    COL_MIN_TEMP,
    COL_RAINFALL,
    COL_MAX_HUMIDITY,
    COL_MIN_HUMIDITY,
];

// ---------------------------------------------------------------------------
// Weather – the fixed part of a row
// ---------------------------------------------------------------------------

/// Weekly weather observation for one SMW of one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weather {
    pub year: i32,
    #[serde(rename = "SMW")]
    pub smw: u32,
    #[serde(rename = "Max_Temp")]
    pub max_temp: f64,
    #[serde(rename = "Min_Temp")]
    pub min_temp: f64,
    pub rainfall: f64,
    #[serde(rename = "Max_Humidity")]
    pub max_humidity: f64,
    #[serde(rename = "Min_Humidity")]
    pub min_humidity: f64,
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// One historical row: weather, derived mean humidity and one optional
/// severity per variety column (indexed like [`Dataset::list_varieties`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    weather: Weather,
    mean_rh: f64,
    severities: Vec<Option<f64>>,
}

impl Record {
    pub fn new(weather: Weather, severities: Vec<Option<f64>>) -> Self {
        let mean_rh = (weather.max_humidity + weather.min_humidity) / 2.0;
        Record {
            weather,
            mean_rh,
            severities,
        }
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    /// Mean relative humidity: average of the max and min humidity.
    pub fn mean_rh(&self) -> f64 {
        self.mean_rh
    }

    /// Severity recorded for the variety at `index`; `None` when the cell was null.
    pub fn severity(&self, index: usize) -> Option<f64> {
        self.severities.get(index).copied().flatten()
    }

    /// Numeric value of a column for this row.
    pub fn value(&self, column: Column) -> Option<f64> {
        let w = &self.weather;
        match column {
            Column::Year => Some(w.year as f64),
            Column::Smw => Some(w.smw as f64),
            Column::MaxTemp => Some(w.max_temp),
            Column::MinTemp => Some(w.min_temp),
            Column::Rainfall => Some(w.rainfall),
            Column::MaxHumidity => Some(w.max_humidity),
            Column::MinHumidity => Some(w.min_humidity),
            Column::MeanRh => Some(self.mean_rh),
            Column::Variety(i) => self.severity(i),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / GroupKey – typed column references
// ---------------------------------------------------------------------------

/// A numeric column of a [`Dataset`]. Variety columns are addressed by their
/// position in [`Dataset::list_varieties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Year,
    Smw,
    MaxTemp,
    MinTemp,
    Rainfall,
    MaxHumidity,
    MinHumidity,
    MeanRh,
    Variety(usize),
}

/// Integer-valued time bucket used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Year,
    Smw,
}

impl GroupKey {
    pub fn of(self, record: &Record) -> i64 {
        match self {
            GroupKey::Year => record.weather.year as i64,
            GroupKey::Smw => record.weather.smw as i64,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The parsed sheet. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Header order of the kept columns, with `Mean_RH` appended.
    columns: Vec<String>,
    varieties: Vec<Variety>,
}

impl Dataset {
    /// `columns` is the source header order of the kept columns; every
    /// record's severities must be indexed like `varieties`.
    pub fn new(records: Vec<Record>, mut columns: Vec<String>, varieties: Vec<Variety>) -> Self {
        if !columns.iter().any(|c| c == COL_MEAN_RH) {
            columns.push(COL_MEAN_RH.to_string());
        }
        Dataset {
            records,
            columns,
            varieties,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Variety columns in dataset column order. May be empty.
    pub fn list_varieties(&self) -> &[Variety] {
        &self.varieties
    }

    /// Position of a variety column, by its exact column name.
    pub fn variety_index(&self, name: &str) -> Result<usize, UnknownVarietyError> {
        self.varieties
            .iter()
            .position(|v| v.column_name() == name)
            .ok_or_else(|| UnknownVarietyError {
                name: name.to_string(),
            })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
