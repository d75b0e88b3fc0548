//! Error types produced by the customer table helpers.

use std::io;

use camino::Utf8PathBuf;
use convoy_core::ValidationError;
use thiserror::Error;

use super::CustomerColumn;

/// Errors produced while reading or appending customer tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CustomerCsvError {
    /// The customer table could not be opened.
    #[error("failed to open customer table {path}: {source}")]
    Open {
        /// Underlying I/O error.
        source: io::Error,
        /// Path of the table.
        path: Utf8PathBuf,
    },
    /// The table is not well-formed CSV.
    #[error("failed to read customer table: {source}")]
    Read {
        /// Underlying CSV error.
        source: csv::Error,
    },
    /// The header row has no column matching one of the accepted names.
    #[error("customer table has no {column} column (expected one of: {})", column.aliases().join(", "))]
    MissingColumn {
        /// Column that could not be found.
        column: CustomerColumn,
    },
    /// A field is missing or could not be parsed.
    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidField {
        /// One-based line number within the table.
        line: u64,
        /// Column holding the field.
        column: CustomerColumn,
        /// Raw field text.
        value: String,
    },
    /// Appending to the table failed.
    #[error("failed to append to customer table {path}: {source}")]
    Append {
        /// Underlying I/O error.
        source: io::Error,
        /// Path of the table.
        path: Utf8PathBuf,
    },
    /// Parsed values are not a usable customer set.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<csv::Error> for CustomerCsvError {
    fn from(source: csv::Error) -> Self {
        Self::Read { source }
    }
}
