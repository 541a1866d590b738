use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn the source file into a [`Dataset`](crate::Dataset).
///
/// Line numbers are 1-based data lines (the header is line 0).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("variety column '{0}' is missing")]
    MissingVariety(String),

    #[error("line {line}: column '{column}' is empty")]
    NullValue { line: usize, column: String },

    #[error("line {line}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        line: usize,
        column: String,
        value: String,
    },
}

/// The requested variety is not a variety column of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variety '{name}'; choose one of the dataset's variety columns")]
pub struct UnknownVarietyError {
    pub name: String,
}
