use std::collections::HashMap;

use calamine::Data;

use crate::decoder::cell_text;
use crate::error::LoadError;

pub const COL_ENABLED: &str = "IsEnabled";
pub const COL_RECIPE_ID: &str = "ID";
pub const COL_RESULT_ID: &str = "ResultItemID";
pub const COL_RESULT_AMOUNT: &str = "ResultItemAmount";
pub const COL_MONEY: &str = "CostMoney";
pub const COL_COST_IDS: &str = "CostItemID";
pub const COL_COST_AMOUNTS: &str = "CostItemAmount";
pub const COL_TAG: &str = "Tag";

// Commentary for human readers, never read
pub const COL_RESULT_NAME: &str = "ResultItemName";
pub const COL_COST_NAME: &str = "CostItemName";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_ENABLED,
    COL_RECIPE_ID,
    COL_RESULT_ID,
    COL_RESULT_AMOUNT,
    COL_MONEY,
    COL_COST_IDS,
    COL_COST_AMOUNTS,
    COL_TAG,
];

/// Column name to zero-based column index, compared case-insensitively
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build from header cells. The first occurrence of a name wins.
    pub fn from_cells(cells: &[Data]) -> Self {
        let mut columns = HashMap::new();
        for (index, cell) in cells.iter().enumerate() {
            let name = cell_text(cell);
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            columns.entry(name.to_lowercase()).or_insert(index);
        }
        HeaderMap { columns }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.columns.get(&name.to_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fail with every missing name at once, in the order given
    pub fn require(&self, names: &[&str]) -> Result<(), LoadError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::MissingColumns { columns: missing })
        }
    }

    /// Index of a column already checked by [`HeaderMap::require`]
    pub(crate) fn index_of(&self, name: &str) -> usize {
        // Unknown columns resolve past any row end and read as empty text
        self.get(name).unwrap_or(usize::MAX)
    }
}

/// Consume the header row and check that all required columns are present.
pub fn resolve_header<'a, I>(rows: &mut I) -> Result<HeaderMap, LoadError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header_row = rows.next().ok_or(LoadError::EmptyTable)?;
    let header = HeaderMap::from_cells(header_row);
    header.require(&REQUIRED_COLUMNS)?;
    Ok(header)
}
