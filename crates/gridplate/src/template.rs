//! Opening templates from files
//!
//! # Example
//!
//! ```rust,no_run
//! use gridplate::prelude::*;
//!
//! let mut template = Template::open("invoice.csv");
//! if !template.examine() {
//!     eprintln!("cannot use template: {:?}", template.fault());
//!     return;
//! }
//!
//! let lines = Substitutions::from_rows([["Tea", "2"], ["Jam", "1"]]);
//! template.insert_row(3, 4, &lines).unwrap();
//! template.save("invoice-filled.csv").unwrap();
//! ```

use std::path::Path;

use crate::{CsvError, CsvReadOptions, CsvReader, FileKind};
use crate::{LoadFault, Template, TemplateError, Workbook, WorkbookExt};

/// File I/O for [`Template`]
pub trait TemplateExt: Sized {
    /// Open a template file.
    ///
    /// Never fails: a file that can't be read or parsed yields a template
    /// holding the fault, which every later operation reports.
    fn open<P: AsRef<Path>>(path: P) -> Self;

    /// Save the selected worksheet to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TemplateError>;
}

impl TemplateExt for Template {
    fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let loaded = load(path);
        if let Err(fault) = &loaded {
            log::warn!("template {} not loaded: {fault}", path.display());
        }
        Template::from_load(loaded)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TemplateError> {
        let sheet = self.worksheet()?.clone();
        let mut workbook = Workbook::empty();
        workbook.add_existing_worksheet(sheet)?;
        workbook.save(path)?;
        Ok(())
    }
}

fn load(path: &Path) -> Result<Workbook, LoadFault> {
    let options = match FileKind::of(path) {
        Some(FileKind::Csv) => CsvReadOptions::default(),
        Some(FileKind::Tsv) => CsvReadOptions::tsv(),
        None => {
            return Err(LoadFault::Format(format!(
                "unsupported template format: {}",
                path.display()
            )))
        }
    };

    let worksheet = CsvReader::read_file(path, &options).map_err(fault_of)?;
    let mut workbook = Workbook::empty();
    workbook
        .add_existing_worksheet(worksheet)
        .map_err(|e| LoadFault::Format(e.to_string()))?;
    Ok(workbook)
}

fn fault_of(err: CsvError) -> LoadFault {
    if err.is_format_error() {
        LoadFault::Format(err.to_string())
    } else {
        LoadFault::Io(err.to_string())
    }
}
