//! Cell storage implementation
//!
//! Sparse, row-based storage: only non-empty cells are kept, in a
//! `BTreeMap<row, BTreeMap<col, CellData>>` so iteration is always row-major.

use std::collections::BTreeMap;

use super::{CellAddress, CellRange, CellValue};
use crate::column::Column;
use crate::row::Row;
use crate::style::StylePool;

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// Check if this cell is effectively empty (blank value and default style)
    pub fn is_empty(&self) -> bool {
        self.value.is_blank() && self.style_index == 0
    }
}

/// Sparse row-based storage for worksheet cells, sizing metadata and merged
/// regions
#[derive(Debug, Clone)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,

    /// Shared style pool for deduplication
    style_pool: StylePool,

    /// Default row height in points
    default_row_height: f64,

    /// Default column width in characters
    default_column_width: f64,

    /// Rows with custom height, visibility or outline level
    rows_meta: BTreeMap<u32, Row>,

    /// Columns with custom width, visibility or outline level
    columns_meta: BTreeMap<u16, Column>,

    /// Merged cell regions, in registration order
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            default_row_height: 15.0,
            default_column_width: 8.43,
            rows_meta: BTreeMap::new(),
            columns_meta: BTreeMap::new(),
            merged_regions: Vec::new(),
        }
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Store a cell
    ///
    /// Empty cell data (blank value, default style) removes the cell instead.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving style)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let style_index = self.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Set just the cell style (preserving value)
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let value = self
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default();
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let result = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        result
    }

    /// Remove every cell of a row, returning them
    pub fn remove_row(&mut self, row: u32) -> Option<BTreeMap<u16, CellData>> {
        self.rows.remove(&row)
    }

    /// Drop cells, row/column settings and merged regions.
    ///
    /// The style pool and defaults stay, so style indices held elsewhere
    /// remain valid.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.rows_meta.clear();
        self.columns_meta.clear();
        self.merged_regions.clear();
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of used cells
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;

        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Largest row index holding a cell or custom row settings
    pub fn last_row(&self) -> Option<u32> {
        let cells = self.rows.keys().next_back().copied();
        let meta = self.rows_meta.keys().next_back().copied();
        cells.max(meta)
    }

    /// Largest column index holding a cell or custom column settings
    pub fn last_col(&self) -> Option<u16> {
        let cells = self
            .rows
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max();
        let meta = self.columns_meta.keys().next_back().copied();
        cells.max(meta)
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    /// Iterate over row indices that have cells
    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// Get custom settings of a row
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows_meta.get(&row)
    }

    /// Store row settings; settings without customization are dropped
    pub fn set_row(&mut self, row: Row) {
        if row.has_custom_settings() {
            self.rows_meta.insert(row.index, row);
        } else {
            self.rows_meta.remove(&row.index);
        }
    }

    /// All rows with custom settings, by index
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows_meta.values()
    }

    /// Get custom settings of a column
    pub fn column(&self, col: u16) -> Option<&Column> {
        self.columns_meta.get(&col)
    }

    /// Store column settings; settings without customization are dropped
    pub fn set_column(&mut self, column: Column) {
        if column.has_custom_settings() {
            self.columns_meta.insert(column.index, column);
        } else {
            self.columns_meta.remove(&column.index);
        }
    }

    /// All columns with custom settings, by index
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns_meta.values()
    }

    /// Get row height (returns default if not customized)
    pub fn row_height(&self, row: u32) -> f64 {
        self.rows_meta
            .get(&row)
            .and_then(|r| r.height)
            .unwrap_or(self.default_row_height)
    }

    /// Get column width (returns default if not customized)
    pub fn column_width(&self, col: u16) -> f64 {
        self.columns_meta
            .get(&col)
            .and_then(|c| c.width)
            .unwrap_or(self.default_column_width)
    }

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Add a merged region without any conflict check
    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    /// Remove a merged region by position
    pub fn remove_merged_region(&mut self, index: usize) -> Option<CellRange> {
        if index < self.merged_regions.len() {
            Some(self.merged_regions.remove(index))
        } else {
            None
        }
    }

    /// Check if a cell is part of a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        let addr = CellAddress::new(row, col);
        self.merged_regions.iter().any(|r| r.contains(&addr))
    }

    /// Get the style pool
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// Get the style pool mutably
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}
