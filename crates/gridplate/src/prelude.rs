//! Prelude module - common imports for gridplate users
//!
//! ```rust
//! use gridplate::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    // Comments
    CellComment,
    CellError,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    Error,
    GridAccessor,
    // Template types
    GridEditor,
    NumberFormat,
    Result,
    Style,
    Substitutions,
    Template,
    TemplateError,
    TemplateOptions,
    // Main types
    Workbook,
    Worksheet,
};

#[cfg(feature = "csv")]
pub use crate::{
    // I/O types
    CsvReader,
    CsvWriter,
    // Extension traits
    TemplateExt,
    WorkbookExt,
};
