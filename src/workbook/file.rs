use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use log::debug;

use crate::error::LoadError;
use crate::workbook::{Sheet, SheetSelector, SheetSource};

/// Workbook file on disk (xlsx, xlsm, xlsb, xls or ods).
///
/// The file is opened read-only and closed when this value is dropped.
pub struct WorkbookFile {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let sheets = open_workbook_auto(path).map_err(|source| LoadError::Workbook {
            path: path.to_path_buf(),
            sheet: None,
            source,
        })?;
        debug!("Opened workbook {}", path.display());

        Ok(WorkbookFile {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

impl SheetSource for WorkbookFile {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, index: usize) -> Result<Sheet, LoadError> {
        let name = self
            .sheets
            .sheet_names()
            .get(index)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound(SheetSelector::by_index(index)))?;

        let range = self
            .sheets
            .worksheet_range(&name)
            .map_err(|source| LoadError::Workbook {
                path: self.path.clone(),
                sheet: Some(name.clone()),
                source,
            })?;

        Ok(Sheet::new(name, anchor_at_a1(&range)))
    }
}

/// calamine trims leading empty rows and columns from a range. Put them
/// back so that row and column positions match the sheet as displayed.
fn anchor_at_a1(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    (0..=last_row)
        .map(|r| {
            (0..=last_col)
                .map(|c| range.get_value((r, c)).cloned().unwrap_or(Data::Empty))
                .collect()
        })
        .collect()
}
