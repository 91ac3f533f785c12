//! Error types for gridplate-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Grid model errors: addressing, bounds, sheets and merged regions
#[derive(Debug, Error)]
pub enum Error {
    /// A1-style address that doesn't parse
    #[error("Bad cell address: {0}")]
    InvalidAddress(String),

    /// `A1:B2`-style range that doesn't parse or can't be used
    #[error("Bad cell range: {0}")]
    InvalidRange(String),

    /// Row index past the grid edge (index, last valid index)
    #[error("Row {0} is past the last row {1}")]
    RowOutOfBounds(u32, u32),

    /// Column index past the grid edge (index, last valid index)
    #[error("Column {0} is past the last column {1}")]
    ColumnOutOfBounds(u16, u16),

    /// No sheet at this index (index, sheet count)
    #[error("No sheet at index {0}, workbook has {1}")]
    SheetOutOfBounds(usize, usize),

    #[error("Bad sheet name: {0}")]
    InvalidSheetName(String),

    #[error("A sheet named {0} already exists")]
    DuplicateSheetName(String),

    /// Merging would make two regions share a cell
    #[error("Range {0} overlaps an existing merged region")]
    MergedCellConflict(String),

    /// Single-cell ranges cannot be merged
    #[error("Range {0} covers a single cell and cannot be merged")]
    DegenerateMerge(String),

    /// Anything else, usually raised by a collaborator
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a collaborator's message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::SheetOutOfBounds(3, 1).to_string(),
            "No sheet at index 3, workbook has 1"
        );
        assert_eq!(Error::other("csv: bad quote").to_string(), "csv: bad quote");
    }
}
