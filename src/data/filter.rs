use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::model::{
    Column, Dataset, GroupKey, Record, COL_MAX_HUMIDITY, COL_MAX_TEMP, COL_MIN_HUMIDITY,
    COL_MIN_TEMP, COL_RAINFALL, COL_SMW, COL_YEAR,
};
use crate::error::UnknownVarietyError;

// ---------------------------------------------------------------------------
// Variety filtering
// ---------------------------------------------------------------------------

/// Indices of records whose severity for the variety at `variety` is present
/// and strictly positive, in dataset order.
pub fn variety_indices(dataset: &Dataset, variety: usize) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.severity(variety).is_some_and(|v| v > 0.0))
        .map(|(i, _)| i)
        .collect()
}

impl Dataset {
    /// Records with a recorded, positive severity for `variety`.
    pub fn filter_by_variety(&self, variety: &str) -> Result<Vec<&Record>, UnknownVarietyError> {
        let idx = self.variety_index(variety)?;
        Ok(self.positive_records(idx))
    }

    /// Table rows for the historical-records view of `variety`.
    pub fn history_rows(&self, variety: &str) -> Result<HistoryTable, UnknownVarietyError> {
        let idx = self.variety_index(variety)?;
        Ok(HistoryTable::new(variety, &self.positive_records(idx), idx))
    }

    /// Mean severity of `variety` per SMW, for the progression chart.
    pub fn weekly_average(&self, variety: &str) -> Result<Vec<(i64, f64)>, UnknownVarietyError> {
        let idx = self.variety_index(variety)?;
        Ok(group_average(
            self.positive_records(idx),
            GroupKey::Smw,
            Column::Variety(idx),
        ))
    }

    /// Table and weekly chart for `variety` from a single filter pass.
    pub fn variety_history(&self, variety: &str) -> Result<VarietyHistory, UnknownVarietyError> {
        let idx = self.variety_index(variety)?;
        let records = self.positive_records(idx);
        Ok(VarietyHistory {
            table: HistoryTable::new(variety, &records, idx),
            weekly: group_average(records.iter().copied(), GroupKey::Smw, Column::Variety(idx)),
        })
    }

    fn positive_records(&self, variety: usize) -> Vec<&Record> {
        variety_indices(self, variety)
            .into_iter()
            .map(|i| &self.records()[i])
            .collect()
    }
}

/// History views of one variety.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarietyHistory {
    pub table: HistoryTable,
    pub weekly: Vec<(i64, f64)>,
}

// ---------------------------------------------------------------------------
// HistoryTable – the historical-records table
// ---------------------------------------------------------------------------

/// Rows for one variety. Serializes as a list of objects whose severity key
/// is the variety's column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryTable {
    pub variety: String,
    pub rows: Vec<HistoryRow>,
}

impl HistoryTable {
    fn new(variety: &str, records: &[&Record], idx: usize) -> Self {
        HistoryTable {
            variety: variety.to_string(),
            rows: records
                .iter()
                .filter_map(|r| HistoryRow::from_record(r, idx))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for HistoryTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.iter().map(|row| KeyedRow {
            variety: &self.variety,
            row,
        }))
    }
}

struct KeyedRow<'a> {
    variety: &'a str,
    row: &'a HistoryRow,
}

impl Serialize for KeyedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let r = self.row;
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry(COL_YEAR, &r.year)?;
        map.serialize_entry(COL_SMW, &r.smw)?;
        map.serialize_entry(self.variety, &r.pdi)?;
        map.serialize_entry(COL_MAX_TEMP, &r.max_temp)?;
        map.serialize_entry(COL_MIN_TEMP, &r.min_temp)?;
        map.serialize_entry(COL_RAINFALL, &r.rainfall)?;
        map.serialize_entry(COL_MAX_HUMIDITY, &r.max_humidity)?;
        map.serialize_entry(COL_MIN_HUMIDITY, &r.min_humidity)?;
        map.end()
    }
}

/// `Year, SMW, <variety>, Max_Temp, Min_Temp, Rainfall, Max_Humidity, Min_Humidity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow {
    pub year: i32,
    pub smw: u32,
    pub pdi: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub rainfall: f64,
    pub max_humidity: f64,
    pub min_humidity: f64,
}

impl HistoryRow {
    fn from_record(record: &Record, variety: usize) -> Option<Self> {
        let w = record.weather();
        Some(HistoryRow {
            year: w.year,
            smw: w.smw,
            pdi: record.severity(variety)?,
            max_temp: w.max_temp,
            min_temp: w.min_temp,
            rainfall: w.rainfall,
            max_humidity: w.max_humidity,
            min_humidity: w.min_humidity,
        })
    }
}

// ---------------------------------------------------------------------------
// Grouped averaging
// ---------------------------------------------------------------------------

/// Arithmetic mean of `value_key` per `group_key`, ascending by key.
///
/// Null values do not contribute; a group with no contributing records is
/// left out rather than reported as NaN.
pub fn group_average<'a, I>(records: I, group_key: GroupKey, value_key: Column) -> Vec<(i64, f64)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sums: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for record in records {
        let Some(value) = record.value(value_key) else {
            continue;
        };
        let slot = sums.entry(group_key.of(record)).or_insert((0.0, 0));
        slot.0 += value;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}
