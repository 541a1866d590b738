//! Writes a synthetic weather/severity sheet in the dashboard's input format.
//!
//! Usage: `generate-sample [OUTPUT]` (default `Model_CSV1.csv`).

use anyhow::{Context, Result};

use soy_pdi::config::DEFAULT_DATA_FILE;
use soy_pdi::data::model::REQUIRED_COLUMNS;
use soy_pdi::severity::Disease;

const VARIETIES: [&str; 6] = ["JS-335", "JS 95-60", "Shivalik", "PK -472", "Bragg", "NRC-7"];
const YEARS: std::ops::RangeInclusive<i32> = 2016..=2021;
/// Kharif season weeks.
const SMW: std::ops::RangeInclusive<u32> = 27..=44;

/// Minimal deterministic PRNG (splitmix64).
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    env_logger::init();
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

    let mut rng = Rng(42);
    let mut writer = csv::Writer::from_path(&output).with_context(|| format!("creating {output}"))?;

    let header: Vec<&str> = REQUIRED_COLUMNS.iter().copied().chain(VARIETIES).collect();
    writer.write_record(&header)?;

    let mut rows = 0usize;
    for year in YEARS {
        for smw in SMW {
            // Monsoon peak around SMW 32-36.
            let wet = 1.0 - ((smw as f64 - 34.0) / 10.0).powi(2);
            let max_temp = round1(rng.uniform(29.0, 34.0) - 2.0 * wet);
            let min_temp = round1(rng.uniform(20.0, 25.0));
            let rainfall = round1((rng.uniform(0.0, 120.0) * wet).max(0.0));
            let max_humidity = round1(rng.uniform(80.0, 98.0));
            let min_humidity = round1(rng.uniform(45.0, 80.0) * (0.7 + 0.3 * wet));
            let mean_rh = (max_humidity + min_humidity) / 2.0;

            let mut record = vec![
                year.to_string(),
                smw.to_string(),
                max_temp.to_string(),
                min_temp.to_string(),
                rainfall.to_string(),
                max_humidity.to_string(),
                min_humidity.to_string(),
            ];

            for (i, _) in VARIETIES.iter().enumerate() {
                let draw = rng.uniform(0.0, 1.0);
                let cell = if draw < 0.15 {
                    // Not scored that week.
                    String::new()
                } else if draw < 0.25 {
                    "0".to_string()
                } else {
                    let disease = Disease::ALL[i % Disease::ALL.len()];
                    let base = disease.estimate(mean_rh, rainfall, min_temp);
                    format!("{:.2}", base + rng.uniform(0.0, 8.0))
                };
                record.push(cell);
            }

            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} weekly records for {} varieties to {output}",
        VARIETIES.len()
    );
    Ok(())
}
