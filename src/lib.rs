//! Core of the soybean PDI dashboard: dataset loading and queries
//! ([`data`]) and the closed-form severity estimators ([`severity`]).
//!
//! The egui front end (`src/main.rs`) and the `pdi-report` binary are thin
//! layers over these modules.

pub mod config;
pub mod data;
pub mod error;
pub mod severity;

pub use data::loader::DataStore;
pub use data::model::{Column, Dataset, GroupKey, Record, Weather};
pub use data::variety::Variety;
pub use error::{LoadError, UnknownVarietyError};
pub use severity::{Disease, SeverityReport, WeatherInputs};
