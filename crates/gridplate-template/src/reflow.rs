//! Band insertion and removal
//!
//! Every band edit rebuilds the grid from a snapshot: cells, comments and
//! row/column settings are relocated one by one, then each old merged region
//! is mapped to its new bounds and re-registered through the reconciler.

use gridplate_core::{CellRange, GridAccessor, MAX_COLS, MAX_ROWS};

use crate::editor::GridEditor;
use crate::error::{Result, TemplateError};

/// Which coordinate a band edit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Rows,
    Columns,
}

impl Axis {
    pub(crate) fn limit(self) -> u32 {
        match self {
            Axis::Rows => MAX_ROWS,
            Axis::Columns => MAX_COLS as u32,
        }
    }

    pub(crate) fn span(self, region: &CellRange) -> (u32, u32) {
        match self {
            Axis::Rows => (region.first_row(), region.last_row()),
            Axis::Columns => (region.first_col() as u32, region.last_col() as u32),
        }
    }

    /// `first..=last` must already be below `limit()`
    pub(crate) fn with_span(self, region: &CellRange, first: u32, last: u32) -> CellRange {
        match self {
            Axis::Rows => region.with_rows(first, last),
            Axis::Columns => region.with_cols(first as u16, last as u16),
        }
    }

    /// Line index of a cell along this axis
    pub(crate) fn index_of(self, row: u32, col: u16) -> u32 {
        match self {
            Axis::Rows => row,
            Axis::Columns => col as u32,
        }
    }

    /// The cell at `index` along this axis, keeping the other coordinate
    pub(crate) fn place(self, row: u32, col: u16, index: u32) -> (u32, u16) {
        match self {
            Axis::Rows => (index, col),
            Axis::Columns => (row, index as u16),
        }
    }

    /// Lines `first..=last` across the whole grid
    pub(crate) fn band(self, first: u32, last: u32) -> CellRange {
        match self {
            Axis::Rows => CellRange::from_indices(first, 0, last, MAX_COLS - 1),
            Axis::Columns => CellRange::from_indices(0, first as u16, MAX_ROWS - 1, last as u16),
        }
    }
}

/// A band edit along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BandEdit {
    /// `count` fresh lines before index `start`
    Open { start: u32, count: u32 },
    /// Lines `start..=end` removed
    Close { start: u32, end: u32 },
}

impl BandEdit {
    /// New position of a line, `None` if it is removed
    fn map_index(self, index: u32) -> Option<u32> {
        match self {
            BandEdit::Open { start, count } => {
                Some(if index >= start { index.saturating_add(count) } else { index })
            }
            BandEdit::Close { start, end } => {
                if index < start {
                    Some(index)
                } else if index > end {
                    Some(index - (end - start + 1))
                } else {
                    None
                }
            }
        }
    }

    /// New spans of a region's `first..=last`.
    ///
    /// Opening inside a region cuts it in two; closing clips it to the lines
    /// that survive, and a region lying wholly inside the band disappears.
    fn map_span(self, first: u32, last: u32) -> Vec<(u32, u32)> {
        match self {
            BandEdit::Open { start, count } => {
                if last < start {
                    vec![(first, last)]
                } else if first >= start {
                    vec![(first.saturating_add(count), last.saturating_add(count))]
                } else {
                    vec![(first, start - 1), (start.saturating_add(count), last.saturating_add(count))]
                }
            }
            BandEdit::Close { start, end } => {
                let count = end - start + 1;
                if last < start {
                    vec![(first, last)]
                } else if first > end {
                    vec![(first - count, last - count)]
                } else if first >= start && last <= end {
                    Vec::new()
                } else {
                    let new_first = if first < start { first } else { start };
                    let new_last = if last > end { last - count } else { start - 1 };
                    vec![(new_first, new_last)]
                }
            }
        }
    }
}

impl<G: GridAccessor> GridEditor<'_, G> {
    /// Insert `count` empty rows before row `start`.
    ///
    /// Rows at or after `start` move down by `count`. A merged region crossing
    /// `start` is cut into the part above the new band and the shifted part
    /// below it. `count == 0` does nothing.
    ///
    /// Fails with [`TemplateError::BandOverflow`], leaving the grid as it
    /// was, when content would be pushed past the last row.
    pub fn open_row_band(&mut self, start: u32, count: u32) -> Result<()> {
        self.open_band(Axis::Rows, start, count)
    }

    /// Insert `count` empty columns before column `start`
    pub fn open_column_band(&mut self, start: u16, count: u16) -> Result<()> {
        self.open_band(Axis::Columns, start as u32, count as u32)
    }

    /// Remove rows `start..=end`, moving later rows up.
    ///
    /// Merged regions are clipped to the surviving rows. `start > end` does
    /// nothing.
    pub fn close_row_band(&mut self, start: u32, end: u32) -> Result<()> {
        if start > end {
            return Ok(());
        }
        self.reflow(Axis::Rows, BandEdit::Close { start, end })
    }

    /// Remove columns `start..=end`, moving later columns left
    pub fn close_column_band(&mut self, start: u16, end: u16) -> Result<()> {
        if start > end {
            return Ok(());
        }
        self.reflow(
            Axis::Columns,
            BandEdit::Close {
                start: start as u32,
                end: end as u32,
            },
        )
    }

    fn open_band(&mut self, axis: Axis, start: u32, count: u32) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if let Some(furthest) = self.furthest_line(axis).filter(|line| *line >= start) {
            let limit = axis.limit();
            if furthest.checked_add(count).map_or(true, |end| end >= limit) {
                log::warn!("{axis:?} band of {count} at {start} refused, line {furthest} would overflow");
                return Err(TemplateError::BandOverflow {
                    start,
                    count,
                    furthest,
                    limit,
                });
            }
        }
        self.reflow(axis, BandEdit::Open { start, count })
    }

    /// Largest line index along `axis` holding a cell, settings, a comment
    /// or part of a merged region
    fn furthest_line(&self, axis: Axis) -> Option<u32> {
        let used = match axis {
            Axis::Rows => self.grid.last_row(),
            Axis::Columns => self.grid.last_col().map(u32::from),
        };
        let commented = self
            .grid
            .comments()
            .into_iter()
            .map(|(row, col, _)| axis.index_of(row, col))
            .max();
        let merged = self
            .grid
            .merged_regions()
            .iter()
            .map(|region| axis.span(region).1)
            .max();
        used.max(commented).max(merged)
    }

    pub(crate) fn reflow(&mut self, axis: Axis, edit: BandEdit) -> Result<()> {
        log::debug!("reflow {axis:?}: {edit:?}");

        let snapshot = self.grid.snapshot();
        self.grid.clear();

        let limit = axis.limit();
        let relocate = |row: u32, col: u16| -> Option<(u32, u16)> {
            edit.map_index(axis.index_of(row, col))
                .filter(|index| *index < limit)
                .map(|index| axis.place(row, col, index))
        };

        let mut dropped = 0usize;
        for row in snapshot.row_indices() {
            for (col, data) in snapshot.row_cells(row) {
                match relocate(row, col) {
                    Some((r, c)) => self.grid.put_cell(r, c, data),
                    None => dropped += 1,
                }
            }
        }
        for (row, col, comment) in snapshot.comments() {
            if let Some((r, c)) = relocate(row, col) {
                self.grid.set_comment_at(r, c, Some(comment));
            }
        }
        if dropped > 0 {
            log::trace!("{dropped} cells removed with the band");
        }

        for region in snapshot.merged_regions() {
            let (first, last) = axis.span(region);
            let spans = edit.map_span(first, last);
            if spans.is_empty() {
                log::warn!("region {region} removed with the band, dropped");
            }

            for (first, last) in spans {
                if first >= limit {
                    log::warn!("region {region} pushed past the grid edge, dropped");
                    continue;
                }
                let mapped = axis.with_span(region, first, last.min(limit - 1));
                if mapped.is_single_cell() {
                    log::warn!("region {region} reduced to single cell {mapped}, dropped");
                    continue;
                }
                if self.register_region(mapped)? == 0 {
                    log::warn!("region {mapped} fully covered after reflow, dropped");
                }
            }
        }

        for row in snapshot.custom_rows() {
            let index = match axis {
                Axis::Rows => edit.map_index(row.index).filter(|r| *r < limit),
                Axis::Columns => Some(row.index),
            };
            if let Some(index) = index {
                self.grid.set_row_settings(row.moved_to(index));
            }
        }
        for column in snapshot.custom_columns() {
            let index = match axis {
                Axis::Rows => Some(column.index),
                Axis::Columns => edit
                    .map_index(column.index as u32)
                    .filter(|c| *c < limit)
                    .map(|c| c as u16),
            };
            if let Some(index) = index {
                self.grid.set_column_settings(column.moved_to(index));
            }
        }

        Ok(())
    }
}
