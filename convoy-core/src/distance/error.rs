use thiserror::Error;

use crate::ValidationError;

/// Errors from [`crate::distance::DistanceProvider::distance_matrix`] and
/// [`crate::DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// No points were provided.
    ///
    /// A matrix always covers at least the depot, so callers should never
    /// reach this with a validated [`crate::CustomerSet`].
    #[error("at least one point is required")]
    EmptyInput,
    /// The matrix does not have one row per point.
    #[error("matrix has {rows} rows but {expected} points were provided")]
    DimensionMismatch {
        /// Rows in the supplied matrix.
        rows: usize,
        /// Number of points the matrix must cover.
        expected: usize,
    },
    /// A row has the wrong number of columns.
    #[error("row {row} has {columns} columns but {expected} expected (matrix must be square)")]
    NonSquare {
        /// Zero-based row index.
        row: usize,
        /// Columns found in that row.
        columns: usize,
        /// Required column count.
        expected: usize,
    },
    /// An entry is negative or not finite.
    #[error("distance from {from} to {to} is invalid: {value}")]
    InvalidDistance {
        /// Source point index.
        from: usize,
        /// Destination point index.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// Coordinates handed to the provider failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
