mod file;
mod memory;

pub use self::file::WorkbookFile;
pub use self::memory::MemoryWorkbook;

use std::fmt;

use calamine::Data;
use log::debug;

use crate::error::LoadError;

/// A single sheet as a dense grid anchored at cell A1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    /// Forward-only cursor over the rows, header first
    pub fn rows(&self) -> impl Iterator<Item = &[Data]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Anything that can list its sheets and hand one of them out
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read the sheet at a zero-based position in [`SheetSource::sheet_names`] order
    fn read_sheet(&mut self, index: usize) -> Result<Sheet, LoadError>;
}

/// Which sheet to load. With neither field set the first sheet is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSelector {
    pub name: Option<String>,
    pub index: Option<usize>,
}

impl SheetSelector {
    pub fn first() -> Self {
        SheetSelector::default()
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        SheetSelector {
            name: Some(name.into()),
            index: None,
        }
    }

    pub fn by_index(index: usize) -> Self {
        SheetSelector {
            name: None,
            index: Some(index),
        }
    }

    fn matches(&self, position: usize, sheet_name: &str) -> bool {
        let name_match = self
            .name
            .as_deref()
            .is_some_and(|wanted| eq_ignore_case(wanted, sheet_name));
        let index_match = self.index == Some(position);
        name_match || index_match
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.index) {
            (Some(name), _) => write!(f, "'{}'", name),
            (None, Some(index)) => write!(f, "index {}", index),
            (None, None) => write!(f, "first sheet"),
        }
    }
}

/// Case-insensitive comparison that also folds non-ASCII letters
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Pick the target sheet out of a workbook.
pub fn select_sheet<S: SheetSource + ?Sized>(
    source: &mut S,
    selector: &SheetSelector,
) -> Result<Sheet, LoadError> {
    let names = source.sheet_names();

    let position = if selector.name.is_none() && selector.index.is_none() {
        if names.is_empty() {
            None
        } else {
            Some(0)
        }
    } else {
        names
            .iter()
            .enumerate()
            .find(|(i, name)| selector.matches(*i, name))
            .map(|(i, _)| i)
    };

    let Some(position) = position else {
        return Err(LoadError::SheetNotFound(selector.clone()));
    };

    let sheet = source.read_sheet(position)?;
    debug!(
        "Selected sheet '{}' (position {}, {} rows)",
        sheet.name,
        position,
        sheet.row_count()
    );
    Ok(sheet)
}
