//! Template block replication

use gridplate_core::{CellComment, CellRange, GridAccessor};

use crate::editor::GridEditor;
use crate::error::Result;
use crate::reflow::{Axis, BandEdit};
use crate::substitutions::Substitutions;

impl<G: GridAccessor> GridEditor<'_, G> {
    /// Replicate rows `from_start..=from_end` once per substitution group,
    /// inserting the copies before row `to_index`.
    ///
    /// Each copy carries the template's cells, styles, comments, row heights
    /// and the merged regions that start on a template row. Its `${}` markers
    /// are then filled with that group's values. With `delete_template` the
    /// template rows are removed afterwards.
    ///
    /// Returns the number of rows inserted. Returns 0 and leaves the grid
    /// untouched when `from_start > from_end`, when any index is past the
    /// last used row, when `subs` is empty, or when the copies would not fit.
    ///
    /// # Errors
    ///
    /// [`TemplateError::SplitLimitExceeded`](crate::TemplateError) when a
    /// copied region cannot be reconciled. The grid is left partially edited.
    pub fn insert_rows(
        &mut self,
        from_start: u32,
        from_end: u32,
        to_index: u32,
        subs: &Substitutions,
        delete_template: bool,
    ) -> Result<u32> {
        let last = self.grid.last_row();
        self.insert_block(
            Axis::Rows,
            Block {
                from_start,
                from_end,
                to_index,
                last,
            },
            subs,
            delete_template,
        )
    }

    /// Column counterpart of [`insert_rows`](Self::insert_rows).
    ///
    /// A region starting on a template column is copied at most as wide as
    /// the part of the block from that column on.
    pub fn insert_columns(
        &mut self,
        from_start: u16,
        from_end: u16,
        to_index: u16,
        subs: &Substitutions,
        delete_template: bool,
    ) -> Result<u32> {
        let last = self.grid.last_col().map(u32::from);
        self.insert_block(
            Axis::Columns,
            Block {
                from_start: from_start as u32,
                from_end: from_end as u32,
                to_index: to_index as u32,
                last,
            },
            subs,
            delete_template,
        )
    }

    fn insert_block(
        &mut self,
        axis: Axis,
        block: Block,
        subs: &Substitutions,
        delete_template: bool,
    ) -> Result<u32> {
        let Some(total) = block.total(axis, subs) else {
            log::debug!("{axis:?} insertion skipped: {block:?} with {} groups", subs.len());
            return Ok(0);
        };
        let Block {
            from_start,
            from_end,
            to_index,
            ..
        } = block;
        let height = block.len();

        log::debug!(
            "inserting {} copies of {axis:?} {from_start}..={from_end} at {to_index}",
            subs.len()
        );

        self.reflow(
            axis,
            BandEdit::Open {
                start: to_index,
                count: total,
            },
        )?;

        let shifted = |index: u32| if index >= to_index { index + total } else { index };
        let sources: Vec<u32> = (from_start..=from_end).map(shifted).collect();

        let comments: Vec<(u32, u16, CellComment)> = if self.options.copy_comments {
            self.grid
                .comments()
                .into_iter()
                .filter(|(row, col, _)| sources.contains(&axis.index_of(*row, *col)))
                .collect()
        } else {
            Vec::new()
        };
        let anchored: Vec<Vec<CellRange>> = sources
            .iter()
            .map(|src| {
                self.grid
                    .merged_regions()
                    .iter()
                    .filter(|region| axis.span(region).0 == *src)
                    .copied()
                    .collect()
            })
            .collect();

        let limit = axis.limit();
        let mut dest = to_index;
        for (key, values) in subs.iter() {
            for (offset, &src) in sources.iter().enumerate() {
                let dst = dest + offset as u32;
                self.copy_line(axis, src, dst);

                for (row, col, comment) in &comments {
                    if axis.index_of(*row, *col) == src {
                        let (r, c) = axis.place(*row, *col, dst);
                        self.grid.set_comment_at(r, c, Some(comment.clone()));
                    }
                }

                for region in &anchored[offset] {
                    let (first, last) = axis.span(region);
                    let mut extent = last - first;
                    if axis == Axis::Columns {
                        extent = extent.min(height - offset as u32 - 1);
                    }
                    let end = dst.saturating_add(extent).min(limit - 1);
                    self.register_region(axis.with_span(region, dst, end))?;
                }
            }

            let copied = axis.band(dest, dest + height - 1);
            let filled = self.fill_markers(&copied, values);
            log::trace!("group {key}: {filled} of {} values placed in {copied}", values.len());
            dest += height;
        }

        if delete_template {
            self.remove_template(axis, &block, total)?;
        }

        Ok(total)
    }

    /// Copy one row or column, with its size settings
    fn copy_line(&mut self, axis: Axis, src: u32, dst: u32) {
        match axis {
            Axis::Rows => {
                for (col, data) in self.grid.row_cells(src) {
                    self.grid.put_cell(dst, col, data);
                }
                if self.options.copy_dimensions {
                    if let Some(settings) = self.grid.row_settings(src).cloned() {
                        self.grid.set_row_settings(settings.moved_to(dst));
                    }
                }
            }
            Axis::Columns => {
                let (src, dst) = (src as u16, dst as u16);
                for row in self.grid.row_indices() {
                    if let Some(data) = self.grid.cell_at(row, src).cloned() {
                        self.grid.put_cell(row, dst, data);
                    }
                }
                if self.options.copy_dimensions {
                    if let Some(settings) = self.grid.column_settings(src).cloned() {
                        self.grid.set_column_settings(settings.moved_to(dst));
                    }
                }
            }
        }
    }

    /// Close the template band after `total` lines were opened at
    /// `to_index`.
    ///
    /// A template cut by the insertion point is closed in two steps, upper
    /// part first.
    fn remove_template(&mut self, axis: Axis, block: &Block, total: u32) -> Result<()> {
        let Block {
            from_start,
            from_end,
            to_index,
            ..
        } = *block;

        if from_start < to_index && to_index <= from_end {
            let upper = to_index - from_start;
            self.reflow(
                axis,
                BandEdit::Close {
                    start: from_start,
                    end: to_index - 1,
                },
            )?;
            self.reflow(
                axis,
                BandEdit::Close {
                    start: to_index + total - upper,
                    end: from_end + total - upper,
                },
            )
        } else if from_end < to_index {
            self.reflow(
                axis,
                BandEdit::Close {
                    start: from_start,
                    end: from_end,
                },
            )
        } else {
            self.reflow(
                axis,
                BandEdit::Close {
                    start: from_start + total,
                    end: from_end + total,
                },
            )
        }
    }
}

/// Template band and insertion point along one axis
#[derive(Debug, Clone, Copy)]
struct Block {
    from_start: u32,
    from_end: u32,
    to_index: u32,
    /// Last used line of the grid
    last: Option<u32>,
}

impl Block {
    fn len(&self) -> u32 {
        self.from_end - self.from_start + 1
    }

    /// Lines to open for `subs`, `None` when the insertion can't proceed
    fn total(&self, axis: Axis, subs: &Substitutions) -> Option<u32> {
        let last = self.last?;
        if subs.is_empty()
            || self.from_start > self.from_end
            || self.from_end > last
            || self.to_index > last
        {
            return None;
        }

        let groups = u32::try_from(subs.len()).ok()?;
        let total = self.len().checked_mul(groups)?;
        match last.checked_add(total) {
            Some(end) if end < axis.limit() => Some(total),
            _ => {
                log::warn!("{total} lines after {last} would run past the grid edge");
                None
            }
        }
    }
}
