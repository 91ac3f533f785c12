use gridplate_core::GridAccessor;

use crate::options::TemplateOptions;

/// Editing operations over one grid.
///
/// The editor holds a mutable borrow of the grid for its lifetime; it caches
/// nothing between calls, every operation re-reads coordinates from the grid.
pub struct GridEditor<'a, G: GridAccessor> {
    pub(crate) grid: &'a mut G,
    pub(crate) options: TemplateOptions,
}

impl<'a, G: GridAccessor> GridEditor<'a, G> {
    /// Create an editor with default options
    pub fn new(grid: &'a mut G) -> Self {
        Self::with_options(grid, TemplateOptions::default())
    }

    /// Create an editor with explicit options
    pub fn with_options(grid: &'a mut G, options: TemplateOptions) -> Self {
        Self { grid, options }
    }

    /// The options in effect
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// The grid being edited
    pub fn grid(&self) -> &G {
        self.grid
    }
}
