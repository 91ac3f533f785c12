//! Editing options

/// Options controlling template editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Maximum slice evaluations while registering one merged region
    /// (default: 65536)
    pub split_limit: usize,
    /// Copy cell comments along with template cells (default: true)
    pub copy_comments: bool,
    /// Copy row heights / column widths of template bands (default: true)
    pub copy_dimensions: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            split_limit: 65_536,
            copy_comments: true,
            copy_dimensions: true,
        }
    }
}

impl TemplateOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the split budget
    pub fn with_split_limit(mut self, limit: usize) -> Self {
        self.split_limit = limit;
        self
    }

    /// Set whether comments are copied
    pub fn with_copy_comments(mut self, copy: bool) -> Self {
        self.copy_comments = copy;
        self
    }

    /// Set whether row heights / column widths are copied
    pub fn with_copy_dimensions(mut self, copy: bool) -> Self {
        self.copy_dimensions = copy;
        self
    }
}
