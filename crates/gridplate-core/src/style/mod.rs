//! Cell styling types
//!
//! The template engine treats styles as opaque: cells carry an index into the
//! sheet's [`StylePool`] and copying a cell copies the index. Only the
//! [`NumberFormat`] is ever inspected, to render date serials.

mod number_format;
mod pool;

pub use number_format::{DateKind, NumberFormat};
pub use pool::StylePool;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`]; colors are `0xRRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Font family, `None` for the sheet default
    pub font_name: Option<String>,
    /// Font size in points, `None` for the sheet default
    pub font_size: Option<u16>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Font color
    pub font_color: Option<u32>,
    /// Solid background fill
    pub fill_color: Option<u32>,
    /// Thin border on all four edges
    pub bordered: bool,
    /// Wrap text inside the cell
    pub wrap_text: bool,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set font color
    pub fn font_color(mut self, rgb: u32) -> Self {
        self.font_color = Some(rgb);
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, rgb: u32) -> Self {
        self.fill_color = Some(rgb);
        self
    }

    /// Draw a thin border around the cell
    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Set a custom number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::Custom(format.into());
        self
    }

    /// Set the number format
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }
}
