//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record does not fit the grid
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] gridplate_core::Error),
}

impl CsvError {
    /// Whether the input itself was malformed, as opposed to unreadable
    pub fn is_format_error(&self) -> bool {
        match self {
            CsvError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof
            ),
            CsvError::Csv(err) => !matches!(err.kind(), csv::ErrorKind::Io(_)),
            CsvError::Parse { .. } | CsvError::Core(_) => true,
        }
    }
}
