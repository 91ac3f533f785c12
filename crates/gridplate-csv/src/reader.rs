//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use gridplate_core::{CellError, CellValue, Worksheet, MAX_COLS, MAX_ROWS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet.
    ///
    /// Records may have different lengths. Empty fields leave the cell blank.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new("Sheet1");
        let mut row_idx = 0u32;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            Self::store_record(&mut worksheet, row_idx, &headers, false)?;
            row_idx += 1;
        }

        for result in csv_reader.records() {
            let record = result?;
            if row_idx >= MAX_ROWS {
                return Err(CsvError::Parse {
                    row: row_idx as usize,
                    column: 0,
                    message: format!("more than {MAX_ROWS} rows"),
                });
            }
            Self::store_record(&mut worksheet, row_idx, &record, options.auto_detect_types)?;
            row_idx += 1;
        }

        log::debug!("read {row_idx} CSV records, {} cells", worksheet.cell_count());
        Ok(worksheet)
    }

    fn store_record(
        worksheet: &mut Worksheet,
        row: u32,
        record: &csv::StringRecord,
        detect: bool,
    ) -> CsvResult<()> {
        if record.len() > MAX_COLS as usize {
            return Err(CsvError::Parse {
                row: row as usize,
                column: record.len(),
                message: format!("more than {MAX_COLS} fields"),
            });
        }

        for (col, field) in record.iter().enumerate() {
            let value = if detect {
                Self::detect_type(field)
            } else if field.is_empty() {
                CellValue::Blank
            } else {
                CellValue::string(field)
            };
            if !value.is_blank() {
                worksheet.set_cell_value_at(row, col as u16, value)?;
            }
        }
        Ok(())
    }

    /// Detect the type of a field value.
    ///
    /// Anything containing a `${` placeholder stays text.
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Blank;
        }
        if trimmed.contains("${") {
            return CellValue::string(field);
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        if let Some(err) = CellError::parse(trimmed) {
            return CellValue::Error(err);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        CellValue::string(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("42"), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type(" 1.5 "), CellValue::Number(1.5));
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type("false"), CellValue::Boolean(false));
        assert_eq!(CsvReader::detect_type("#N/A"), CellValue::Error(CellError::Na));
        assert_eq!(CsvReader::detect_type("inf"), CellValue::string("inf"));
        assert_eq!(CsvReader::detect_type("${}"), CellValue::string("${}"));
        assert_eq!(CsvReader::detect_type("${1}"), CellValue::string("${1}"));
        assert_eq!(CsvReader::detect_type(""), CellValue::Blank);
    }

    #[test]
    fn test_read_ragged_records() {
        let data = "name,qty\n${},${}\nTotal\n";
        let sheet = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap(), CellValue::string("name"));
        assert_eq!(sheet.get_value("B2").unwrap(), CellValue::string("${}"));
        assert_eq!(sheet.get_value("A3").unwrap(), CellValue::string("Total"));
        assert_eq!(sheet.cell_count(), 5);
    }

    #[test]
    fn test_header_is_kept_as_text() {
        let options = CsvReadOptions {
            has_header: true,
            ..Default::default()
        };
        let sheet = CsvReader::read("1,true\n2,false\n".as_bytes(), &options).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap(), CellValue::string("1"));
        assert_eq!(sheet.get_value("B1").unwrap(), CellValue::string("true"));
        assert_eq!(sheet.get_value("B2").unwrap(), CellValue::Boolean(false));
    }

    #[test]
    fn test_read_without_detection() {
        let options = CsvReadOptions {
            auto_detect_types: false,
            ..CsvReadOptions::tsv()
        };
        let sheet = CsvReader::read("7\t\tx\n".as_bytes(), &options).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap(), CellValue::string("7"));
        assert!(sheet.get_value("B1").unwrap().is_blank());
        assert_eq!(sheet.get_value("C1").unwrap(), CellValue::string("x"));
    }
}
