//! Error types for rustpid-core.

use thiserror::Error;

/// Result type alias for rustpid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for rustpid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input is not a well-formed table of numeric 2D positions.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A centroid table must hold at least one row.
    #[error("centroid table is empty")]
    EmptyTable,

    /// Coordinate columns of different length.
    #[error("column length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    /// Visit order is not a permutation of the table rows.
    #[error("invalid visit order: {0}")]
    InvalidVisitOrder(String),

    /// Label text that does not name a particle class.
    #[error("unknown particle label: {0:?}")]
    UnknownLabel(String),
}

impl Error {
    /// Returns true if the error rejects the shape or content of the input table.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::EmptyTable | Self::LengthMismatch { .. }
        )
    }
}
