//! Placeholder filling
//!
//! Positional markers are cells holding exactly `${}`; they take values
//! front to back. Named markers are `${name}` tokens anywhere inside a
//! string cell and are replaced by looking the name up.

use std::collections::{BTreeSet, HashMap, VecDeque};

use gridplate_core::{CellData, CellRange, CellValue, GridAccessor};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::editor::GridEditor;

static NAMED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\$\{([^}]+)\}").unwrap()
});

/// Trimmed names of the `${name}` tokens in `text`, in order of appearance
pub fn placeholder_names(text: &str) -> Vec<&str> {
    NAMED_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim())
        .collect()
}

/// Replace every `${name}` token in `text` with `lookup(name)`, or with an
/// empty string when the lookup has nothing. Replacements are inserted
/// literally.
pub fn rewrite_placeholders<'v>(text: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    NAMED_TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            lookup(name).unwrap_or_default().to_string()
        })
        .into_owned()
}

impl<G: GridAccessor> GridEditor<'_, G> {
    /// Fill the `${}` cells of `range`, row-major, with `values` in order.
    ///
    /// Each value is used at most once. Markers left over once the values
    /// run out become blank (their style is kept). Returns the number of
    /// markers that received a value.
    pub fn fill_markers(&mut self, range: &CellRange, values: &[CellValue]) -> usize {
        let mut queue: VecDeque<&CellValue> = values.iter().collect();
        let mut filled = 0;

        for (row, col) in self.marker_cells(range) {
            let style_index = self
                .grid
                .cell_at(row, col)
                .map(|cell| cell.style_index)
                .unwrap_or(0);
            let value = match queue.pop_front() {
                Some(value) => {
                    filled += 1;
                    value.clone()
                }
                None => CellValue::Blank,
            };
            self.grid
                .put_cell(row, col, CellData::with_style(value, style_index));
        }

        if !queue.is_empty() {
            log::trace!("{} values left unused in {range}", queue.len());
        }
        filled
    }

    /// Positions of `${}` cells inside `range`, row-major
    fn marker_cells(&self, range: &CellRange) -> Vec<(u32, u16)> {
        self.grid
            .row_indices()
            .into_iter()
            .filter(|row| (range.first_row()..=range.last_row()).contains(row))
            .flat_map(|row| {
                self.grid
                    .row_cells(row)
                    .into_iter()
                    .filter(|(col, data)| {
                        (range.first_col()..=range.last_col()).contains(col)
                            && data.value.is_positional_marker()
                    })
                    .map(move |(col, _)| (row, col))
            })
            .collect()
    }

    /// Replace `${name}` tokens across the grid.
    ///
    /// For each distinct (trimmed) name, the first string cell in row-major
    /// order holding a `${name}` token is selected. Every selected cell is
    /// rewritten once: all of its tokens are replaced by the value of their
    /// name, or removed when the name was not supplied. Other cells stay
    /// untouched, even if they hold the same tokens.
    ///
    /// When a name is supplied twice the first value wins. Returns the number
    /// of distinct names that found a cell.
    pub fn fill_variables<I, K, V>(&mut self, key_values: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut lookup: HashMap<String, String> = HashMap::new();
        for (key, value) in key_values {
            let name = key.as_ref().trim().to_string();
            if !lookup.contains_key(&name) {
                names.push(name.clone());
                lookup.insert(name, value.as_ref().to_string());
            }
        }
        if names.is_empty() {
            return 0;
        }

        let candidates = self.token_cells();

        let mut targets = BTreeSet::new();
        let mut matched = 0;
        for name in &names {
            let hit = candidates
                .iter()
                .find(|(_, _, tokens)| tokens.iter().any(|token| token == name));
            if let Some((row, col, _)) = hit {
                matched += 1;
                targets.insert((*row, *col));
            }
        }

        for (row, col) in targets {
            if let Some(cell) = self.grid.cell_at_mut(row, col) {
                if let Some(text) = cell.value.as_string() {
                    let rewritten =
                        rewrite_placeholders(text, |name| lookup.get(name).map(String::as_str));
                    cell.value = CellValue::from(rewritten);
                }
            }
        }

        log::debug!("filled {matched} of {} named placeholders", names.len());
        matched
    }

    /// String cells holding at least one `${name}` token, row-major
    fn token_cells(&self) -> Vec<(u32, u16, Vec<String>)> {
        let mut cells = Vec::new();
        for row in self.grid.row_indices() {
            for (col, data) in self.grid.row_cells(row) {
                if let Some(text) = data.value.as_string() {
                    let tokens: Vec<String> =
                        placeholder_names(text).into_iter().map(String::from).collect();
                    if !tokens.is_empty() {
                        cells.push((row, col, tokens));
                    }
                }
            }
        }
        cells
    }
}
