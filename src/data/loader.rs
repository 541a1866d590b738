use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use csv::StringRecord;

use super::model::{Dataset, Record, Weather, REQUIRED_COLUMNS};
use super::variety::Variety;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// DataStore – load-once handle on the source file
// ---------------------------------------------------------------------------

/// Memoizing loader for one source file.
///
/// The first successful [`load`](DataStore::load) parses the file; every
/// later call hands out the same `Arc<Dataset>`. Failures are not cached.
#[derive(Debug)]
pub struct DataStore {
    path: PathBuf,
    dataset: OnceLock<Arc<Dataset>>,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DataStore {
            path: path.into(),
            dataset: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file on first use, then return the cached dataset.
    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = self.dataset.get() {
            return Ok(Arc::clone(ds));
        }
        let ds = load_file(&self.path)?;
        log::info!(
            "Loaded {} records from {} with varieties {:?}",
            ds.len(),
            self.path.display(),
            ds.list_varieties()
                .iter()
                .map(|v| v.column_name())
                .collect::<Vec<_>>()
        );
        Ok(Arc::clone(self.dataset.get_or_init(|| Arc::new(ds))))
    }

    /// Whether the dataset has already been loaded.
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }
}

impl Dataset {
    /// Fail fast when any of `names` is not a variety column of this dataset.
    pub fn require_varieties<S: AsRef<str>>(&self, names: &[S]) -> Result<(), LoadError> {
        for name in names {
            let name = name.as_ref();
            if self.variety_index(name).is_err() {
                return Err(LoadError::MissingVariety(name.to_string()));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Read a weather/severity sheet from disk.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file, path)
}

/// Parse a sheet from any reader; `source` is only used in error messages.
///
/// Layout: a header row containing at least [`REQUIRED_COLUMNS`]; variety
/// columns are recognised by name and may hold empty cells. Anything else is
/// ignored.
pub fn parse_csv<R: Read>(reader: R, source: &Path) -> Result<Dataset, LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut fixed_idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in fixed_idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }

    let mut varieties = Vec::new();
    let mut variety_idx = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    for (i, name) in headers.iter().enumerate() {
        // First occurrence wins; fixed columns are also looked up that way.
        if columns.iter().any(|c| c == name) {
            log::warn!("Ignoring duplicate column '{name}' at position {}", i + 1);
            continue;
        }
        if REQUIRED_COLUMNS.contains(&name) {
            columns.push(name.to_string());
        } else if let Some(v) = Variety::from_column(name) {
            columns.push(name.to_string());
            varieties.push(v);
            variety_idx.push(i);
        } else {
            log::debug!("Ignoring column '{name}'");
        }
    }
    if varieties.is_empty() {
        log::warn!("{} has no variety columns", source.display());
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(csv_err)?;
        let line = row_no + 1;
        let cell = |col: usize| Cell {
            row: &row,
            line,
            index: fixed_idx[col],
            name: REQUIRED_COLUMNS[col],
        };

        let weather = Weather {
            year: cell(0).integer()?,
            smw: cell(1).integer()?,
            max_temp: cell(2).float()?,
            min_temp: cell(3).float()?,
            rainfall: cell(4).float()?,
            max_humidity: cell(5).float()?,
            min_humidity: cell(6).float()?,
        };

        let severities = variety_idx
            .iter()
            .zip(&varieties)
            .map(|(&index, v)| {
                Cell {
                    row: &row,
                    line,
                    index,
                    name: v.column_name(),
                }
                .optional_float()
            })
            .collect::<Result<Vec<_>, _>>()?;

        records.push(Record::new(weather, severities));
    }

    Ok(Dataset::new(records, columns, varieties))
}

/// Spellings treated as a missing value, matched case-insensitively.
const NULL_TOKENS: [&str; 5] = ["", "na", "n/a", "nan", "null"];

fn is_null(s: &str) -> bool {
    NULL_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t))
}

/// One field of one row, with what is needed to report a bad value.
struct Cell<'a> {
    row: &'a StringRecord,
    line: usize,
    index: usize,
    name: &'a str,
}

impl Cell<'_> {
    fn raw(&self) -> &str {
        self.row.get(self.index).unwrap_or("")
    }

    fn invalid(&self) -> LoadError {
        LoadError::InvalidValue {
            line: self.line,
            column: self.name.to_string(),
            value: self.raw().to_string(),
        }
    }

    fn optional_float(&self) -> Result<Option<f64>, LoadError> {
        let s = self.raw();
        if is_null(s) {
            return Ok(None);
        }
        s.parse::<f64>().map(Some).map_err(|_| self.invalid())
    }

    fn float(&self) -> Result<f64, LoadError> {
        self.optional_float()?.ok_or_else(|| LoadError::NullValue {
            line: self.line,
            column: self.name.to_string(),
        })
    }

    /// Integers may be written as `2019` or, after a spreadsheet round trip,
    /// `2019.0`.
    fn integer<T: TryFrom<i64>>(&self) -> Result<T, LoadError> {
        let s = self.raw();
        let n = match s.parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                let f = self.float()?;
                if f.fract() != 0.0 || !f.is_finite() {
                    return Err(self.invalid());
                }
                f as i64
            }
        };
        T::try_from(n).map_err(|_| self.invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity,Min_Humidity,JS-335,Notes,Bragg\n";

    fn parse(body: &str) -> Result<Dataset, LoadError> {
        let text = format!("{HEADER}{body}");
        parse_csv(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn parses_rows_and_derives_mean_rh() {
        let ds = parse(
            "2019,33,31.2,23.8,45.0,94,72,12.5,wet,\n\
             2019,34,30.1,23.1,0,90,65,,,NA\n",
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.columns(),
            [
                "Year", "SMW", "Max_Temp", "Min_Temp", "Rainfall", "Max_Humidity",
                "Min_Humidity", "JS-335", "Bragg", "Mean_RH"
            ]
        );
        let first = &ds.records()[0];
        assert_eq!(first.weather().smw, 33);
        assert!((first.mean_rh() - 83.0).abs() < 1e-12);
        assert_eq!(first.severity(0), Some(12.5));
        assert_eq!(first.severity(1), None);
        assert_eq!(ds.records()[1].severity(1), None);
    }

    #[test]
    fn spreadsheet_style_integers_are_accepted() {
        let ds = parse("2019.0,33.0,31,23,1,90,70,1,,2\n").unwrap();
        assert_eq!(ds.records()[0].weather().year, 2019);
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let text = "Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity\n2019,33,1,1,1,1\n";
        let err = parse_csv(text.as_bytes(), Path::new("t.csv")).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Min_Humidity")));
    }

    #[test]
    fn bad_cells_report_line_and_column() {
        let err = parse("2019,33,31,23,1,90,70,1,,2\n2019,34,hot,23,1,90,70,1,,2\n").unwrap_err();
        match err {
            LoadError::InvalidValue { line, column, value } => {
                assert_eq!((line, column.as_str(), value.as_str()), (2, "Max_Temp", "hot"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse("2019,33.5,31,23,1,90,70,1,,2\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { ref column, .. } if column == "SMW"));

        let err = parse("2019,33,31,,1,90,70,1,,2\n").unwrap_err();
        assert!(matches!(err, LoadError::NullValue { line: 1, .. }));

        let err = parse("2019,33,31,23,1,90,70,severe,,2\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { ref column, .. } if column == "JS-335"));
    }

    #[test]
    fn duplicate_variety_header_keeps_first_column() {
        let text = "Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity,Min_Humidity,Bragg,Bragg\n\
                    2019,33,31,23,1,90,70,4,9\n";
        let ds = parse_csv(text.as_bytes(), Path::new("dup.csv")).unwrap();
        assert_eq!(ds.list_varieties(), [Variety::Bragg]);
        assert_eq!(ds.records()[0].severity(0), Some(4.0));
        assert_eq!(ds.columns().iter().filter(|c| *c == "Bragg").count(), 1);
    }

    #[test]
    fn sheet_without_varieties_loads() {
        let text = "Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity,Min_Humidity\n\
                    2019,33,31,23,1,90,70\n";
        let ds = parse_csv(text.as_bytes(), Path::new("plain.csv")).unwrap();
        assert!(ds.list_varieties().is_empty());
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = parse("2019,33,31,23\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn require_varieties_fails_fast() {
        let ds = parse("2019,33,31,23,1,90,70,1,,2\n").unwrap();
        assert!(ds.require_varieties(&["JS-335", "Bragg"]).is_ok());
        let err = ds.require_varieties(&["Bragg", "Gaurav"]).unwrap_err();
        assert!(matches!(err, LoadError::MissingVariety(ref v) if v == "Gaurav"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let store = DataStore::new("/nonexistent/Model_CSV1.csv");
        assert!(matches!(store.load(), Err(LoadError::Open { .. })));
        assert!(!store.is_loaded());
    }
}
