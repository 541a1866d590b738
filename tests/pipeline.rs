use std::io::Write;
use std::sync::Arc;

use soy_pdi::data::filter::group_average;
use soy_pdi::severity::{self, Disease, WeatherInputs};
use soy_pdi::{Column, DataStore, GroupKey, LoadError, Variety};

const SHEET: &str = "\
Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity,Min_Humidity,JS-335,Shivalik,Station,PK -472
2018,33,31.4,23.9,42.0,95,74,18.5,,Jabalpur,0
2018,34,30.8,23.1,61.5,96,78,22.0,4.5,Jabalpur,
2018,35,30.2,22.6,12.0,91,66,,6.0,Jabalpur,2.5
2019,33,32.0,24.2,8.0,89,61,9.0,0,Jabalpur,NA
2019,34,31.1,23.5,30.2,93,70,15.0,3.5,Jabalpur,1.0
";

fn write_sheet(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_is_memoized() {
    let file = write_sheet(SHEET);
    let store = DataStore::new(file.path());
    let first = store.load().unwrap();
    let second = store.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(store.is_loaded());
}

#[test]
fn varieties_follow_column_order() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    let names: Vec<String> = ds.list_varieties().iter().map(|v| v.to_string()).collect();
    assert_eq!(names, ["JS-335", "Shivalik", "PK -472"]);
    assert_eq!(ds.list_varieties()[2], Variety::Pk472);
    assert!(!ds.columns().iter().any(|c| c == "Station"));
}

#[test]
fn mean_rh_matches_source_humidities() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    for r in ds.records() {
        let w = r.weather();
        assert!((r.mean_rh() - (w.max_humidity + w.min_humidity) / 2.0).abs() < 1e-12);
    }
}

#[test]
fn filtering_keeps_only_positive_severities() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();

    for variety in ds.list_varieties() {
        let idx = ds.variety_index(variety.column_name()).unwrap();
        let rows = ds.filter_by_variety(variety.column_name()).unwrap();
        assert!(rows.iter().all(|r| r.severity(idx).is_some_and(|v| v > 0.0)));
    }

    let shivalik = ds.filter_by_variety("Shivalik").unwrap();
    let weeks: Vec<(i32, u32)> = shivalik
        .iter()
        .map(|r| (r.weather().year, r.weather().smw))
        .collect();
    assert_eq!(weeks, [(2018, 34), (2018, 35), (2019, 34)]);
}

#[test]
fn unknown_variety_is_rejected() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    let err = ds.filter_by_variety("NonexistentColumn").unwrap_err();
    assert_eq!(err.name, "NonexistentColumn");
    // Weather columns are not varieties either.
    assert!(ds.filter_by_variety("Rainfall").is_err());
}

#[test]
fn weekly_average_for_chart() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    let weekly = ds.weekly_average("JS-335").unwrap();
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0].0, 33);
    assert!((weekly[0].1 - 13.75).abs() < 1e-9);
    assert_eq!(weekly[1].0, 34);
    assert!((weekly[1].1 - 18.5).abs() < 1e-9);

    let keys: Vec<i64> = weekly.iter().map(|p| p.0).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert!(weekly.iter().all(|p| p.1.is_finite()));
}

#[test]
fn group_average_over_weather_columns() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    let rain_by_year = group_average(ds.records(), GroupKey::Year, Column::Rainfall);
    assert_eq!(rain_by_year.len(), 2);
    assert!((rain_by_year[0].1 - (42.0 + 61.5 + 12.0) / 3.0).abs() < 1e-9);
    assert!((rain_by_year[1].1 - 19.1).abs() < 1e-9);
}

#[test]
fn history_rows_expose_table_columns() {
    let file = write_sheet(SHEET);
    let ds = DataStore::new(file.path()).load().unwrap();
    let table = ds.history_rows("PK -472").unwrap();
    assert_eq!(table.variety, "PK -472");
    let rows = &table.rows;
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].year, rows[0].smw, rows[0].pdi), (2018, 35, 2.5));
    assert_eq!(rows[1].min_humidity, 70.0);
}

#[test]
fn missing_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path().join("Model_CSV1.csv"));
    assert!(matches!(store.load(), Err(LoadError::Open { .. })));
}

#[test]
fn failed_load_is_retried_once_the_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Model_CSV1.csv");
    let store = DataStore::new(&path);
    assert!(store.load().is_err());

    std::fs::write(&path, SHEET).unwrap();
    let ds = store.load().unwrap();
    assert_eq!(ds.len(), 5);
    assert!(Arc::ptr_eq(&ds, &store.load().unwrap()));
}

#[test]
fn sheet_without_variety_columns_is_valid() {
    let file = write_sheet(
        "Year,SMW,Max_Temp,Min_Temp,Rainfall,Max_Humidity,Min_Humidity,Station\n\
         2019,33,32.0,24.2,8.0,89,61,Jabalpur\n",
    );
    let ds = DataStore::new(file.path()).load().unwrap();
    assert!(ds.list_varieties().is_empty());
    assert_eq!(ds.len(), 1);
    let err = ds.filter_by_variety("JS-335").unwrap_err();
    assert_eq!(err.name, "JS-335");
}

#[test]
fn malformed_sheet_is_load_error() {
    let file = write_sheet("Year,SMW,Max_Temp\n2019,33,31\n");
    let err = DataStore::new(file.path()).load().unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("Min_Temp")));
}

#[test]
fn estimators_are_deterministic_and_non_negative() {
    let inputs = WeatherInputs::default();
    let a = severity::estimate_all(inputs);
    let b = severity::estimate_all(inputs);
    assert_eq!(a, b);
    assert!(a.estimates.iter().all(|e| e.pdi >= 0.0));
    assert!((a.get(Disease::Anthracnose) - 15.3).abs() < 1e-9);
    assert!((severity::rab(85.0, 50.0, 24.0) - 8.01).abs() < 1e-9);
}
