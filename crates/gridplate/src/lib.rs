//! # gridplate
//!
//! Template-driven editing of worksheet grids.
//!
//! A template is an ordinary worksheet holding `${}` markers (filled by
//! position) and `${name}` placeholders (filled by name). gridplate
//! replicates template rows or columns once per group of values, shifts the
//! rest of the sheet out of the way, and keeps merged regions free of
//! overlaps throughout.
//!
//! ## Features
//!
//! - Replicate template rows/columns with their styles, comments, sizes and
//!   merged regions
//! - Positional and named placeholder filling
//! - Insert and remove whole bands of rows or columns
//! - Read and write CSV/TSV files (`csv` feature, on by default)
//!
//! ## Example
//!
//! ```rust
//! use gridplate::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Orders for ${client}").unwrap();
//! sheet.set_cell_value("A2", "${}").unwrap();
//! sheet.set_cell_value("B2", "${}").unwrap();
//! sheet.set_cell_value("A3", "End").unwrap();
//!
//! let mut template = Template::new(workbook);
//! let orders = Substitutions::from_rows([["Tea", "2"], ["Jam", "1"]]);
//! template.insert_row(1, 2, &orders).unwrap();
//! template.fill_variables([("client", "ACME")]).unwrap();
//!
//! let sheet = template.worksheet().unwrap();
//! assert_eq!(sheet.display_value_at(0, 0), "Orders for ACME");
//! assert_eq!(sheet.display_value_at(2, 0), "Jam");
//! assert_eq!(sheet.display_value_at(3, 0), "End");
//!
//! // Save to file
//! // template.into_workbook().unwrap().save("orders.csv").unwrap();
//! ```

pub mod prelude;
#[cfg(feature = "csv")]
mod template;

#[cfg(feature = "csv")]
pub use template::TemplateExt;

// Re-export core types
pub use gridplate_core::{
    CellAddress,
    // Comments
    CellComment,
    CellData,
    CellError,
    CellRange,
    // Cell types
    CellValue,
    Column,
    // Error types
    Error,
    // Grid access
    GridAccessor,
    NumberFormat,
    Result,
    Row,
    // Style types
    Style,
    StylePool,
    // Main types
    Workbook,
    Worksheet,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export template types
pub use gridplate_template::{
    placeholder_names, rewrite_placeholders, split_candidate, GridEditor, LoadFault,
    Substitutions, Template, TemplateError, TemplateOptions,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use gridplate_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};

#[cfg(feature = "csv")]
use std::path::Path;

/// Extension trait for Workbook to add file I/O
#[cfg(feature = "csv")]
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the active worksheet to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

#[cfg(feature = "csv")]
impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        let options = match FileKind::of(path) {
            Some(FileKind::Csv) => CsvReadOptions::default(),
            Some(FileKind::Tsv) => CsvReadOptions::tsv(),
            None => {
                return Err(Error::other(format!(
                    "Unsupported file format: {}",
                    path.display()
                )))
            }
        };

        let mut worksheet =
            CsvReader::read_file(path, &options).map_err(|e| Error::other(e.to_string()))?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            worksheet.set_name(sheet_name_from(stem));
        }

        let mut workbook = Workbook::empty();
        workbook.add_existing_worksheet(worksheet)?;
        Ok(workbook)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let options = match FileKind::of(path) {
            Some(FileKind::Csv) => CsvWriteOptions::default(),
            Some(FileKind::Tsv) => CsvWriteOptions::tsv(),
            None => {
                return Err(Error::other(format!(
                    "Unsupported file format: {}",
                    path.display()
                )))
            }
        };

        match self.worksheet(self.active_sheet()) {
            Some(sheet) => CsvWriter::write_file(sheet, path, &options)
                .map_err(|e| Error::other(e.to_string())),
            None => Err(Error::other("No worksheets to save")),
        }
    }
}

/// File formats recognised by extension
#[cfg(feature = "csv")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileKind {
    Csv,
    Tsv,
}

#[cfg(feature = "csv")]
impl FileKind {
    pub(crate) fn of(path: &Path) -> Option<FileKind> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Some(FileKind::Csv),
            Some("tsv") | Some("tab") => Some(FileKind::Tsv),
            _ => None,
        }
    }
}

/// A valid sheet name derived from a file name
#[cfg(feature = "csv")]
fn sheet_name_from(stem: &str) -> String {
    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    let name: String = stem
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if name.is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}
