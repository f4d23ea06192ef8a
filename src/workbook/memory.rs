use crate::error::LoadError;
use crate::workbook::{Sheet, SheetSelector, SheetSource};

/// Workbook held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl SheetSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn read_sheet(&mut self, index: usize) -> Result<Sheet, LoadError> {
        self.sheets
            .get(index)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound(SheetSelector::by_index(index)))
    }
}
