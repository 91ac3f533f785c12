//! # gridplate-csv
//!
//! CSV reader and writer for gridplate worksheets.
//!
//! Templates round-trip through CSV by position: row 0 of the file is row 0
//! of the sheet, and `${...}` placeholders are read back as text.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
