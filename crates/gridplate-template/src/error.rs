//! Error types for gridplate-template

use gridplate_core::CellRange;
use thiserror::Error;

/// Result type alias using [`TemplateError`]
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors raised by template operations.
///
/// Precondition failures (bad indices, empty substitutions) are not errors:
/// those operations return a zero count instead.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The document could not be parsed when it was loaded
    #[error("Template format error: {0}")]
    Format(String),

    /// The document could not be read when it was loaded
    #[error("Template I/O error: {0}")]
    Io(String),

    /// Splitting a merged region did not settle within the work budget
    #[error("Splitting merged region {candidate} exceeded {limit} slice evaluations")]
    SplitLimitExceeded {
        /// Region whose registration was abandoned
        candidate: CellRange,
        /// Budget that was exhausted
        limit: usize,
    },

    /// Opening a band would push content past the last row or column
    #[error("Opening {count} lines at {start} would push line {furthest} past the grid edge ({limit})")]
    BandOverflow {
        /// First line of the band
        start: u32,
        /// Lines requested
        count: u32,
        /// Furthest line holding content at or after `start`
        furthest: u32,
        /// Number of lines along the axis
        limit: u32,
    },

    /// The workbook has no worksheet to edit
    #[error("No worksheet selected")]
    NoWorksheet,

    /// Grid model error
    #[error("Grid error: {0}")]
    Core(#[from] gridplate_core::Error),
}

/// Why a template failed to load, kept so later operations can refuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFault {
    /// Unreadable or corrupt content
    #[error("format error: {0}")]
    Format(String),

    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for LoadFault {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::InvalidData | std::io::ErrorKind::UnexpectedEof => {
                LoadFault::Format(err.to_string())
            }
            _ => LoadFault::Io(err.to_string()),
        }
    }
}

impl From<LoadFault> for TemplateError {
    fn from(fault: LoadFault) -> Self {
        match fault {
            LoadFault::Format(msg) => TemplateError::Format(msg),
            LoadFault::Io(msg) => TemplateError::Io(msg),
        }
    }
}
