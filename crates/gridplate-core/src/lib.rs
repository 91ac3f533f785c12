//! # gridplate-core
//!
//! Core grid model for the gridplate template engine.
//!
//! This crate provides the types the editing core works on:
//! - [`CellValue`] - Typed cell values (numbers, strings, booleans, errors, formulas, blanks)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and rectangular ranges
//! - [`Style`] - Opaque cell formatting, deduplicated in a [`StylePool`]
//! - [`Worksheet`], [`Workbook`] - The document structures
//! - [`GridAccessor`] - The narrow contract the template engine edits through
//!
//! ## Example
//!
//! ```rust
//! use gridplate_core::{CellRange, CellValue, GridAccessor, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A1", "${}").unwrap();
//! sheet.set_cell_value_at(0, 1, CellValue::Number(3.0)).unwrap();
//! sheet.merge_cells(&CellRange::parse("C1:D1").unwrap()).unwrap();
//!
//! assert_eq!(sheet.last_row(), Some(0));
//! assert_eq!(sheet.merged_regions().len(), 1);
//! ```

pub mod cell;
pub mod column;
pub mod comment;
pub mod error;
pub mod grid;
pub mod row;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue, POSITIONAL_MARKER};
pub use column::Column;
pub use comment::CellComment;
pub use error::{Error, Result};
pub use grid::GridAccessor;
pub use row::Row;
pub use style::{DateKind, NumberFormat, Style, StylePool};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
