//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::column::Column;
use crate::comment::CellComment;
use crate::error::{Error, Result};
use crate::grid::GridAccessor;
use crate::row::Row;
use crate::style::{Style, StylePool};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cell-level access by index, region and sizing access go through the
/// [`GridAccessor`] implementation; the inherent methods here add A1-style
/// addressing, checked merging and style handling on top.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
    /// Cell comments (keyed by (row, col))
    comments: BTreeMap<(u32, u16), CellComment>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            comments: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get cell value by address string (blank if the cell is absent)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices (blank if the cell is absent)
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get a cell's style index by row/column.
    ///
    /// Returns 0 if the cell does not exist or has the default style.
    pub fn cell_style_index_at(&self, row: u32, col: u16) -> u32 {
        self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0)
    }

    /// Get a style by its index in this worksheet's style pool.
    pub fn style_by_index(&self, style_index: u32) -> Option<&Style> {
        self.cells.style_pool().get(style_index)
    }

    /// Get the non-default style applied to a cell, if any.
    pub fn cell_style_at(&self, row: u32, col: u16) -> Option<&Style> {
        match self.cell_style_index_at(row, col) {
            0 => None,
            idx => self.style_by_index(idx),
        }
    }

    /// The cell value as a reader sees it (date serials rendered as dates)
    pub fn display_value_at(&self, row: u32, col: u16) -> String {
        match self.cells.get(row, col) {
            Some(cell) => cell
                .value
                .to_display_string(&self.cells.style_pool().resolve(cell.style_index).number_format),
            None => String::new(),
        }
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell formula by row and column indices
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        self.validate_cell_position(row, col)?;

        let formula = if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        };

        self.cells.set_value(row, col, CellValue::formula(formula));
        Ok(())
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by row and column indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    // === Range Operations ===

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    // === Row/Column Operations ===

    /// Get row height
    pub fn row_height(&self, row: u32) -> f64 {
        self.cells.row_height(row)
    }

    /// Set row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        let mut settings = self.row_or_default(row);
        settings.height = Some(height);
        self.cells.set_row(settings);
    }

    /// Check if row is hidden
    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.cells.row(row).map(|r| r.hidden).unwrap_or(false)
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        let mut settings = self.row_or_default(row);
        settings.hidden = hidden;
        self.cells.set_row(settings);
    }

    /// Get column width
    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        let mut settings = self.column_or_default(col);
        settings.width = Some(width);
        self.cells.set_column(settings);
    }

    /// Check if column is hidden
    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.cells.column(col).map(|c| c.hidden).unwrap_or(false)
    }

    /// Set column hidden state
    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        let mut settings = self.column_or_default(col);
        settings.hidden = hidden;
        self.cells.set_column(settings);
    }

    fn row_or_default(&self, row: u32) -> Row {
        self.cells.row(row).cloned().unwrap_or_else(|| Row::new(row))
    }

    fn column_or_default(&self, col: u16) -> Column {
        self.cells
            .column(col)
            .cloned()
            .unwrap_or_else(|| Column::new(col))
    }

    // === Merged Cells ===

    /// Merge cells, refusing single cells and overlaps with existing regions
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if range.is_single_cell() {
            return Err(Error::DegenerateMerge(range.to_string()));
        }
        if range.end.row >= MAX_ROWS || range.end.col >= MAX_COLS {
            return Err(Error::InvalidRange(range.to_string()));
        }
        if self
            .cells
            .merged_regions()
            .iter()
            .any(|existing| range.overlaps(existing))
        {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// Unmerge cells, returning whether the exact region existed
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        let found = self
            .cells
            .merged_regions()
            .iter()
            .position(|existing| existing == range);

        match found {
            Some(i) => self.cells.remove_merged_region(i).is_some(),
            None => false,
        }
    }

    /// Check if a cell is part of a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        self.cells.is_merged(row, col)
    }

    // === Cell Comments ===

    /// Attach a comment by address string
    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.comments.insert((addr.row, addr.col), comment);
        Ok(())
    }

    /// Get a comment by address string
    pub fn comment(&self, address: &str) -> Result<Option<&CellComment>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.comments.get(&(addr.row, addr.col)))
    }

    /// Number of comments on the sheet
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    // === Internal ===

    /// Get the style pool
    pub fn style_pool(&self) -> &StylePool {
        self.cells.style_pool()
    }

    /// Get the style pool mutably
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        self.cells.style_pool_mut()
    }

    /// Validate cell position
    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all non-empty cells, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }
}

impl GridAccessor for Worksheet {
    fn last_row(&self) -> Option<u32> {
        self.cells.last_row()
    }

    fn last_col(&self) -> Option<u16> {
        self.cells.last_col()
    }

    fn row_indices(&self) -> Vec<u32> {
        self.cells.row_indices().collect()
    }

    fn row_cells(&self, row: u32) -> Vec<(u16, CellData)> {
        self.cells
            .iter_row(row)
            .map(|(col, data)| (col, data.clone()))
            .collect()
    }

    fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    fn cell_at_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.cells.get_mut(row, col)
    }

    fn put_cell(&mut self, row: u32, col: u16, data: CellData) {
        self.cells.set(row, col, data);
    }

    fn remove_row(&mut self, row: u32) {
        self.cells.remove_row(row);
    }

    fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.comments.get(&(row, col))
    }

    fn set_comment_at(&mut self, row: u32, col: u16, comment: Option<CellComment>) {
        match comment {
            Some(comment) => {
                self.comments.insert((row, col), comment);
            }
            None => {
                self.comments.remove(&(row, col));
            }
        }
    }

    fn comments(&self) -> Vec<(u32, u16, CellComment)> {
        self.comments
            .iter()
            .map(|(&(row, col), comment)| (row, col, comment.clone()))
            .collect()
    }

    fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    fn add_merged_region(&mut self, range: CellRange) {
        self.cells.add_merged_region(range);
    }

    fn row_settings(&self, row: u32) -> Option<&Row> {
        self.cells.row(row)
    }

    fn set_row_settings(&mut self, row: Row) {
        self.cells.set_row(row);
    }

    fn custom_rows(&self) -> Vec<Row> {
        self.cells.rows().cloned().collect()
    }

    fn column_settings(&self, col: u16) -> Option<&Column> {
        self.cells.column(col)
    }

    fn set_column_settings(&mut self, column: Column) {
        self.cells.set_column(column);
    }

    fn custom_columns(&self) -> Vec<Column> {
        self.cells.columns().cloned().collect()
    }

    fn snapshot(&self) -> Self {
        self.clone()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.comments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.name(), "Test");
        assert!(ws.is_empty());
        assert_eq!(ws.last_row(), None);
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_string(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert!(ws.get_value("D1").unwrap().is_blank());
        assert!(ws.set_cell_value_at(MAX_ROWS, 0, 1.0).is_err());
    }

    #[test]
    fn test_formula_gets_equals_prefix() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_formula_at(0, 0, "SUM(B1:B10)").unwrap();

        assert_eq!(ws.get_value_at(0, 0).formula_text(), Some("=SUM(B1:B10)"));
    }

    #[test]
    fn test_display_value_uses_date_format() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value_at(0, 0, 45292.0).unwrap();
        ws.set_cell_style_at(0, 0, &Style::new().number_format("yyyy-mm-dd"))
            .unwrap();
        ws.set_cell_value_at(0, 1, 45292.0).unwrap();

        assert_eq!(ws.display_value_at(0, 0), "2024-01-01");
        assert_eq!(ws.display_value_at(0, 1), "45292");
        assert_eq!(ws.display_value_at(5, 5), "");
    }

    #[test]
    fn test_used_range() {
        let mut ws = Worksheet::new("Test");

        assert!(ws.used_range().is_none());

        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();

        assert_eq!(ws.used_range(), Some(CellRange::from_indices(5, 3, 10, 7)));
    }

    #[test]
    fn test_row_column_dimensions() {
        let mut ws = Worksheet::new("Test");

        assert!((ws.row_height(0) - 15.0).abs() < 0.001);
        assert!((ws.column_width(0) - 8.43).abs() < 0.001);

        ws.set_row_height(5, 30.0);
        ws.set_column_width(3, 20.0);
        ws.set_column_hidden(3, true);

        assert!((ws.row_height(5) - 30.0).abs() < 0.001);
        assert!((ws.column_width(3) - 20.0).abs() < 0.001);
        assert!(ws.is_column_hidden(3));
        assert_eq!(ws.custom_rows().len(), 1);
        assert_eq!(ws.last_col(), Some(3));
    }

    #[test]
    fn test_merge_cells() {
        let mut ws = Worksheet::new("Test");

        ws.merge_cells(&CellRange::parse("A1:C3").unwrap()).unwrap();
        assert_eq!(ws.merged_regions().len(), 1);
        assert!(ws.is_merged(1, 1));

        let overlapping = CellRange::parse("B2:D4").unwrap();
        assert!(matches!(
            ws.merge_cells(&overlapping),
            Err(Error::MergedCellConflict(_))
        ));

        let single = CellRange::parse("F6").unwrap();
        assert!(matches!(
            ws.merge_cells(&single),
            Err(Error::DegenerateMerge(_))
        ));

        assert!(ws.unmerge_cells(&CellRange::parse("A1:C3").unwrap()));
        assert!(ws.merged_regions().is_empty());
    }

    #[test]
    fn test_comments() {
        let mut ws = Worksheet::new("Test");

        ws.set_comment("B2", CellComment::new("Ana", "check")).unwrap();
        ws.set_comment_at(0, 0, Some(CellComment::text_only("first")));

        assert_eq!(ws.comment_count(), 2);
        assert_eq!(ws.comment("B2").unwrap().map(|c| c.text.as_str()), Some("check"));

        let positions: Vec<_> = ws.comments().into_iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(positions, vec![(0, 0), (1, 1)]);

        ws.set_comment_at(1, 1, None);
        assert_eq!(ws.comment_count(), 1);
    }

    #[test]
    fn test_snapshot_is_detached_and_clear_keeps_styles() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", "x").unwrap();
        ws.set_cell_style("A1", &Style::new().bold(true)).unwrap();
        ws.merge_cells(&CellRange::parse("A2:B2").unwrap()).unwrap();
        ws.set_row_height(0, 20.0);

        let snapshot = ws.snapshot();
        ws.clear();

        assert!(ws.is_empty());
        assert!(ws.merged_regions().is_empty());
        assert!(ws.custom_rows().is_empty());
        assert_eq!(snapshot.cell_count(), 1);
        assert_eq!(snapshot.merged_regions().len(), 1);

        let style_index = snapshot.cell_style_index_at(0, 0);
        assert_eq!(ws.style_by_index(style_index), Some(&Style::new().bold(true)));
    }
}
