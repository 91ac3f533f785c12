//! Delimited-text options

/// How delimited text is parsed into a worksheet
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field separator, `,` by default
    pub delimiter: u8,
    /// Quoting character, `"` by default
    pub quote: u8,
    /// Treat the first record as a header. Header fields are still stored as
    /// row 0 but are never type-detected (default: false)
    pub has_header: bool,
    /// Turn numeric, boolean and error literals into typed cells. Fields
    /// holding a `${` placeholder always stay text (default: true)
    pub auto_detect_types: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_header: false,
            auto_detect_types: true,
        }
    }
}

impl CsvReadOptions {
    /// Tab-separated input
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    /// Use another field separator
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// How a worksheet is rendered as delimited text
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field separator, `,` by default
    pub delimiter: u8,
    /// Quoting character, `"` by default
    pub quote: u8,
    /// Record terminator, CRLF by default
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            line_terminator: LineTerminator::CRLF,
        }
    }
}

impl CsvWriteOptions {
    /// Tab-separated output
    pub fn tsv() -> Self {
        Self::default().with_delimiter(b'\t')
    }

    /// Use another field separator
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Record terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// `\n`
    LF,
    /// `\r\n`
    CRLF,
    /// `\r`
    CR,
}
