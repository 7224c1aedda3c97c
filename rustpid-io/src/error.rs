//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the header.
    #[error("missing column: {0:?}")]
    MissingColumn(String),

    /// A cell that cannot be parsed for its column.
    #[error("invalid value {value:?} in column {column:?} at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] rustpid_core::Error),
}

impl Error {
    /// Returns true if the input file is not a well-formed table of numeric
    /// 2D positions.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::MissingColumn(_) | Self::InvalidValue { .. } | Self::Csv(_) => true,
            Self::CoreError(err) => err.is_invalid_input(),
            Self::Io(_) | Self::Json(_) => false,
        }
    }
}
