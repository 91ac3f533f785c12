//! Template sessions over a loaded workbook

use gridplate_core::{Workbook, Worksheet};

use crate::editor::GridEditor;
use crate::error::{LoadFault, Result, TemplateError};
use crate::options::TemplateOptions;
use crate::substitutions::Substitutions;

/// A workbook opened as a template, or the fault that stopped it loading.
///
/// Operations run against the selected worksheet (initially the workbook's
/// active sheet). When loading failed, every operation reports the stored
/// fault and does nothing.
///
/// # Example
///
/// ```rust
/// use gridplate_core::Workbook;
/// use gridplate_template::{LoadFault, Template, TemplateError};
///
/// let broken = Template::from_load(Err::<Workbook, _>(LoadFault::Format("truncated".into())));
/// assert!(!broken.examine());
/// assert!(matches!(broken.workbook(), Err(TemplateError::Format(_))));
///
/// let mut template = Template::new(Workbook::new());
/// assert!(template.examine());
/// assert_eq!(template.fill_variables([("name", "Ana")]).unwrap(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    state: std::result::Result<Workbook, LoadFault>,
    sheet: Option<usize>,
    options: TemplateOptions,
}

impl Template {
    /// Wrap a loaded workbook
    pub fn new(workbook: Workbook) -> Self {
        let sheet = (!workbook.is_empty()).then(|| workbook.active_sheet());
        Self {
            state: Ok(workbook),
            sheet,
            options: TemplateOptions::default(),
        }
    }

    /// Wrap the outcome of loading a workbook, keeping a failure as the fault
    pub fn from_load<E: Into<LoadFault>>(loaded: std::result::Result<Workbook, E>) -> Self {
        match loaded {
            Ok(workbook) => Self::new(workbook),
            Err(err) => {
                let fault = err.into();
                log::debug!("template stored load fault: {fault}");
                Self {
                    state: Err(fault),
                    sheet: None,
                    options: TemplateOptions::default(),
                }
            }
        }
    }

    /// Replace the editing options
    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// The editing options in effect
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Check that the template loaded and has a worksheet selected
    pub fn examine(&self) -> bool {
        self.state.is_ok() && self.sheet.is_some()
    }

    /// The stored load fault, if any
    pub fn fault(&self) -> Option<&LoadFault> {
        self.state.as_ref().err()
    }

    /// Index of the selected worksheet
    pub fn selected_sheet(&self) -> Option<usize> {
        self.sheet
    }

    /// Select the worksheet later operations edit
    pub fn select_sheet(&mut self, index: usize) -> Result<()> {
        let workbook = self.loaded()?;
        if index >= workbook.sheet_count() {
            return Err(gridplate_core::Error::SheetOutOfBounds(index, workbook.sheet_count()).into());
        }
        self.sheet = Some(index);
        Ok(())
    }

    /// Replicate template rows, see [`GridEditor::insert_rows`]
    pub fn insert_rows(
        &mut self,
        from_start: u32,
        from_end: u32,
        to_index: u32,
        subs: &Substitutions,
        delete_template: bool,
    ) -> Result<u32> {
        self.editor()?
            .insert_rows(from_start, from_end, to_index, subs, delete_template)
    }

    /// Replicate a single template row and remove it afterwards
    pub fn insert_row(&mut self, from: u32, to_index: u32, subs: &Substitutions) -> Result<u32> {
        self.insert_rows(from, from, to_index, subs, true)
    }

    /// Replicate template columns, see [`GridEditor::insert_columns`]
    pub fn insert_columns(
        &mut self,
        from_start: u16,
        from_end: u16,
        to_index: u16,
        subs: &Substitutions,
        delete_template: bool,
    ) -> Result<u32> {
        self.editor()?
            .insert_columns(from_start, from_end, to_index, subs, delete_template)
    }

    /// Replace named placeholders, see [`GridEditor::fill_variables`]
    pub fn fill_variables<I, K, V>(&mut self, key_values: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(self.editor()?.fill_variables(key_values))
    }

    /// The selected worksheet
    pub fn worksheet(&self) -> Result<&Worksheet> {
        let workbook = self.loaded()?;
        self.sheet
            .and_then(|index| workbook.worksheet(index))
            .ok_or(TemplateError::NoWorksheet)
    }

    /// The loaded workbook
    pub fn workbook(&self) -> Result<&Workbook> {
        self.loaded()
    }

    /// Take the loaded workbook out of the template
    pub fn into_workbook(self) -> Result<Workbook> {
        self.state.map_err(TemplateError::from)
    }

    fn loaded(&self) -> Result<&Workbook> {
        self.state.as_ref().map_err(|fault| fault.clone().into())
    }

    fn editor(&mut self) -> Result<GridEditor<'_, Worksheet>> {
        let options = self.options;
        let index = self.sheet;
        let workbook = self
            .state
            .as_mut()
            .map_err(|fault| TemplateError::from(fault.clone()))?;
        let sheet = index
            .and_then(|index| workbook.worksheet_mut(index))
            .ok_or(TemplateError::NoWorksheet)?;
        Ok(GridEditor::with_options(sheet, options))
    }
}

impl From<Workbook> for Template {
    fn from(workbook: Workbook) -> Self {
        Self::new(workbook)
    }
}
