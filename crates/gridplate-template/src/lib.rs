//! # gridplate-template
//!
//! The template-driven editing core of gridplate.
//!
//! A [`GridEditor`] borrows any [`GridAccessor`](gridplate_core::GridAccessor)
//! and offers four layers of operations:
//!
//! - **Region reconciliation** ([`GridEditor::register_region`]): adds a merged
//!   region, splitting it around regions it would overlap.
//! - **Reflow** ([`GridEditor::open_row_band`] and friends): inserts or removes
//!   whole rows/columns, relocating cells, comments, regions and sizes.
//! - **Template insertion** ([`GridEditor::insert_rows`],
//!   [`GridEditor::insert_columns`]): replicates a block once per
//!   substitution group and fills its `${}` markers.
//! - **Placeholder filling** ([`GridEditor::fill_markers`],
//!   [`GridEditor::fill_variables`]).
//!
//! [`Template`] wraps a loaded workbook (or the fault that prevented loading)
//! and routes every operation through an editor on the selected sheet.
//!
//! ## Example
//!
//! ```rust
//! use gridplate_core::{CellRange, CellValue, GridAccessor, Worksheet};
//! use gridplate_template::{GridEditor, Substitutions};
//!
//! let mut sheet = Worksheet::new("Invoice");
//! sheet.set_cell_value("A1", "Item").unwrap();
//! sheet.set_cell_value("A2", "${}").unwrap();
//! sheet.set_cell_value("B2", "${}").unwrap();
//! sheet.set_cell_value("A3", "Total").unwrap();
//!
//! let subs: Substitutions = vec![
//!     ("apple", vec!["Apple".into(), 3.into()]),
//!     ("pear", vec!["Pear".into(), 5.into()]),
//! ]
//! .into_iter()
//! .map(|(k, v): (&str, Vec<CellValue>)| (k, v))
//! .collect();
//!
//! let inserted = GridEditor::new(&mut sheet)
//!     .insert_rows(1, 1, 2, &subs, true)
//!     .unwrap();
//!
//! assert_eq!(inserted, 2);
//! assert_eq!(sheet.get_value("A2").unwrap().as_string(), Some("Apple"));
//! assert_eq!(sheet.get_value("B3").unwrap().as_number(), Some(5.0));
//! assert_eq!(sheet.get_value("A4").unwrap().as_string(), Some("Total"));
//! ```

mod editor;
pub mod error;
mod fill;
mod insert;
mod merge;
pub mod options;
mod reflow;
pub mod substitutions;
pub mod template;

pub use editor::GridEditor;
pub use error::{LoadFault, Result, TemplateError};
pub use fill::{placeholder_names, rewrite_placeholders};
pub use merge::split_candidate;
pub use options::TemplateOptions;
pub use substitutions::Substitutions;
pub use template::Template;
