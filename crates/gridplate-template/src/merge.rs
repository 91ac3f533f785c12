//! Merged-region reconciliation
//!
//! A candidate region that would overlap an existing one is cut into the
//! parts lying outside that region and each part is retried, until every
//! piece either fits or has shrunk to a single cell.

use gridplate_core::{CellRange, GridAccessor};

use crate::editor::GridEditor;
use crate::error::{Result, TemplateError};

/// Cut `candidate` into the slices lying outside `source`.
///
/// Slices are taken in a fixed order (below `source`, above it, left of it,
/// right of it), each from what remains of `candidate` after the previous
/// cut, so they never overlap each other or `source`. Single-cell slices are
/// dropped. If the two ranges don't overlap, `candidate` comes back whole.
pub fn split_candidate(candidate: &CellRange, source: &CellRange) -> Vec<CellRange> {
    if !candidate.overlaps(source) {
        return vec![*candidate];
    }

    let mut slices = Vec::with_capacity(4);
    let mut rest = *candidate;

    if rest.last_row() > source.last_row() {
        slices.push(rest.with_rows(source.last_row() + 1, rest.last_row()));
        rest = rest.with_rows(rest.first_row(), source.last_row());
    }
    if rest.first_row() < source.first_row() {
        slices.push(rest.with_rows(rest.first_row(), source.first_row() - 1));
        rest = rest.with_rows(source.first_row(), rest.last_row());
    }
    if rest.first_col() < source.first_col() {
        slices.push(rest.with_cols(rest.first_col(), source.first_col() - 1));
        rest = rest.with_cols(source.first_col(), rest.last_col());
    }
    if rest.last_col() > source.last_col() {
        slices.push(rest.with_cols(source.last_col() + 1, rest.last_col()));
    }

    slices.retain(|slice| !slice.is_single_cell());
    slices
}

impl<G: GridAccessor> GridEditor<'_, G> {
    /// Add a merged region, splitting it around existing regions.
    ///
    /// Returns the number of slices registered. A single-cell candidate
    /// registers nothing. Afterwards the region set is still free of
    /// overlaps and the registered slices cover `candidate` minus what was
    /// already merged (and minus isolated single cells).
    ///
    /// # Errors
    ///
    /// [`TemplateError::SplitLimitExceeded`] when more than
    /// `options.split_limit` slices had to be evaluated. Slices registered
    /// before that point stay registered.
    pub fn register_region(&mut self, candidate: CellRange) -> Result<usize> {
        if candidate.is_single_cell() {
            log::trace!("dropping single-cell region {candidate}");
            return Ok(0);
        }

        let limit = self.options.split_limit;
        let mut pending = vec![candidate];
        let mut evaluated = 0usize;
        let mut registered = 0usize;

        while let Some(piece) = pending.pop() {
            evaluated += 1;
            if evaluated > limit {
                return Err(TemplateError::SplitLimitExceeded { candidate, limit });
            }

            let conflict = self
                .grid
                .merged_regions()
                .iter()
                .find(|existing| existing.overlaps(&piece))
                .copied();

            match conflict {
                None => {
                    self.grid.add_merged_region(piece);
                    registered += 1;
                }
                Some(source) => {
                    let slices = split_candidate(&piece, &source);
                    log::trace!("region {piece} conflicts with {source}, {} slices", slices.len());
                    // depth-first, in slice order
                    pending.extend(slices.into_iter().rev());
                }
            }
        }

        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TemplateOptions;
    use gridplate_core::Worksheet;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    fn covered_cells(regions: &[CellRange]) -> usize {
        regions.iter().map(|r| r.cell_count() as usize).sum()
    }

    #[test]
    fn test_split_order_below_above_left_right() {
        // B2:F6 surrounds C3:E5 on every side
        let slices = split_candidate(&range("B2:F6"), &range("C3:E5"));

        assert_eq!(
            slices,
            vec![
                range("B6:F6"), // below
                range("B2:F2"), // above
                range("B3:B5"), // left
                range("F3:F5"), // right
            ]
        );
    }

    #[test]
    fn test_split_drops_single_cells() {
        // only a one-cell sliver is left on the right
        let slices = split_candidate(&range("A1:C1"), &range("A1:B1"));
        assert!(slices.is_empty());

        let slices = split_candidate(&range("A1:C2"), &range("A1:B2"));
        assert_eq!(slices, vec![range("C1:C2")]);
    }

    #[test]
    fn test_split_without_overlap_is_identity() {
        assert_eq!(split_candidate(&range("A1:B2"), &range("D4:E5")), vec![range("A1:B2")]);
    }

    #[test]
    fn test_register_without_conflict() {
        let mut sheet = Worksheet::new("S");
        let mut editor = GridEditor::new(&mut sheet);

        assert_eq!(editor.register_region(range("A1:B2")).unwrap(), 1);
        assert_eq!(editor.register_region(range("C3")).unwrap(), 0);
        assert_eq!(sheet.merged_regions(), &[range("A1:B2")]);
    }

    #[test]
    fn test_register_splits_around_existing() {
        let mut sheet = Worksheet::new("S");
        sheet.merge_cells(&range("C3:D4")).unwrap();

        let registered = GridEditor::new(&mut sheet)
            .register_region(range("A1:F6"))
            .unwrap();

        assert_eq!(registered, 4);
        assert_eq!(
            sheet.merged_regions()[1..].to_vec(),
            vec![range("A5:F6"), range("A1:F2"), range("A3:B4"), range("E3:F4")]
        );
        // area conservation: 36 candidate cells minus the 4 already merged
        assert_eq!(covered_cells(&sheet.merged_regions()[1..]), 32);
    }

    #[test]
    fn test_register_recurses_into_second_conflict() {
        let mut sheet = Worksheet::new("S");
        sheet.merge_cells(&range("A1:A2")).unwrap();
        sheet.merge_cells(&range("D1:D2")).unwrap();

        let registered = GridEditor::new(&mut sheet)
            .register_region(range("A1:F2"))
            .unwrap();

        assert_eq!(registered, 2);
        assert_eq!(
            sheet.merged_regions()[2..].to_vec(),
            vec![range("B1:C2"), range("E1:F2")]
        );
    }

    #[test]
    fn test_fully_covered_candidate_registers_nothing() {
        let mut sheet = Worksheet::new("S");
        sheet.merge_cells(&range("A1:D4")).unwrap();

        let registered = GridEditor::new(&mut sheet)
            .register_region(range("B2:C3"))
            .unwrap();

        assert_eq!(registered, 0);
        assert_eq!(sheet.merged_regions().len(), 1);
    }

    #[test]
    fn test_split_limit_is_reported() {
        let mut sheet = Worksheet::new("S");
        sheet.merge_cells(&range("C3:D4")).unwrap();
        let options = TemplateOptions::default().with_split_limit(2);

        let err = GridEditor::with_options(&mut sheet, options)
            .register_region(range("A1:F6"))
            .unwrap_err();

        assert!(matches!(
            err,
            TemplateError::SplitLimitExceeded { limit: 2, .. }
        ));
    }

    fn arb_range() -> impl Strategy<Value = CellRange> {
        (0u32..12, 0u16..12, 0u32..5, 0u16..5)
            .prop_map(|(r, c, h, w)| CellRange::from_indices(r, c, r + h, c + w))
    }

    proptest! {
        #[test]
        fn prop_regions_never_overlap(candidates in prop::collection::vec(arb_range(), 1..20)) {
            let mut sheet = Worksheet::new("S");
            let mut editor = GridEditor::new(&mut sheet);
            for candidate in candidates {
                editor.register_region(candidate).unwrap();
            }

            let regions = sheet.merged_regions();
            for (i, a) in regions.iter().enumerate() {
                prop_assert!(!a.is_single_cell());
                for b in &regions[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{} overlaps {}", a, b);
                }
            }
        }

        #[test]
        fn prop_new_slices_cover_only_free_candidate_cells(
            existing in prop::collection::vec(arb_range(), 0..8),
            candidate in arb_range(),
        ) {
            let mut sheet = Worksheet::new("S");
            let mut editor = GridEditor::new(&mut sheet);
            for region in existing {
                editor.register_region(region).unwrap();
            }
            let before = sheet.merged_regions().to_vec();

            let registered = GridEditor::new(&mut sheet).register_region(candidate).unwrap();
            let added = &sheet.merged_regions()[before.len()..];
            prop_assert_eq!(added.len(), registered);

            let free = candidate
                .cells()
                .filter(|cell| !before.iter().any(|r| r.contains(cell)))
                .count();
            prop_assert!(covered_cells(added) <= free);

            for slice in added {
                prop_assert!(candidate.covers(slice));
                prop_assert!(!before.iter().any(|r| r.overlaps(slice)));
            }
        }
    }
}
