//! Error types for rank correlation.

use thiserror::Error;

/// Errors raised when the input to a correlation cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KendallError {
    /// The two sequences have different lengths.
    #[error("Length mismatch: x has {x_len} values, y has {y_len}")]
    LengthMismatch {
        /// Length of the first sequence.
        x_len: usize,
        /// Length of the second sequence.
        y_len: usize,
    },

    /// Fewer than two observations were supplied.
    #[error("Too few observations: need at least 2, got {n}")]
    TooFewObservations {
        /// Number of observations supplied.
        n: usize,
    },

    /// A value is NaN or infinite.
    #[error("Non-finite value in {sequence} at index {index}")]
    NonFinite {
        /// Which sequence held the value, `"x"` or `"y"`.
        sequence: &'static str,
        /// Position of the offending value.
        index: usize,
    },

    /// A tau matrix was requested over zero columns.
    #[error("No columns supplied")]
    NoColumns,

    /// The number of column names does not match the number of columns.
    #[error("Got {names} column names for {columns} columns")]
    ColumnNameMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of columns supplied.
        columns: usize,
    },
}
