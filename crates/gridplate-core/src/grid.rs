//! The grid access contract
//!
//! The template engine never touches a [`Worksheet`](crate::Worksheet)
//! directly; it edits through [`GridAccessor`]. Coordinates are re-resolved on
//! every call, nothing handed out here is meant to outlive a single edit.

use crate::cell::{CellData, CellRange};
use crate::column::Column;
use crate::comment::CellComment;
use crate::row::Row;

/// Row, cell, region and sizing access over one sheet-like grid
pub trait GridAccessor {
    /// Largest row index holding a cell or custom row settings
    fn last_row(&self) -> Option<u32>;

    /// Largest column index holding a cell or custom column settings
    fn last_col(&self) -> Option<u16>;

    /// Indices of rows holding at least one cell, ascending
    fn row_indices(&self) -> Vec<u32>;

    /// Cells of a row, by ascending column
    fn row_cells(&self, row: u32) -> Vec<(u16, CellData)>;

    /// A single cell
    fn cell_at(&self, row: u32, col: u16) -> Option<&CellData>;

    /// A single cell, mutably
    fn cell_at_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData>;

    /// Create or overwrite a cell; empty data removes it
    fn put_cell(&mut self, row: u32, col: u16, data: CellData);

    /// Remove every cell of a row
    fn remove_row(&mut self, row: u32);

    /// The comment attached to a cell
    fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment>;

    /// Attach a comment to a cell, `None` detaches it
    fn set_comment_at(&mut self, row: u32, col: u16, comment: Option<CellComment>);

    /// Every comment with its position, row-major
    fn comments(&self) -> Vec<(u32, u16, CellComment)>;

    /// The region set, in registration order
    fn merged_regions(&self) -> &[CellRange];

    /// Append a region without any conflict check
    fn add_merged_region(&mut self, range: CellRange);

    /// Custom settings of a row
    fn row_settings(&self, row: u32) -> Option<&Row>;

    /// Store row settings at `row.index`
    fn set_row_settings(&mut self, row: Row);

    /// Every row with custom settings, ascending
    fn custom_rows(&self) -> Vec<Row>;

    /// Custom settings of a column
    fn column_settings(&self, col: u16) -> Option<&Column>;

    /// Store column settings at `column.index`
    fn set_column_settings(&mut self, column: Column);

    /// Every column with custom settings, ascending
    fn custom_columns(&self) -> Vec<Column>;

    /// A detached copy of the whole grid
    fn snapshot(&self) -> Self
    where
        Self: Sized;

    /// Drop rows, cells, comments, regions and row/column settings.
    ///
    /// Style handles stay valid after a clear.
    fn clear(&mut self);
}
