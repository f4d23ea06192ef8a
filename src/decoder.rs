//! Row decoding: turns the data rows of a sheet into [`RecipeRecord`]s.

use calamine::Data;
use log::debug;

use crate::error::LoadError;
use crate::header::{
    HeaderMap, COL_COST_AMOUNTS, COL_COST_IDS, COL_ENABLED, COL_MONEY, COL_RECIPE_ID,
    COL_RESULT_AMOUNT, COL_RESULT_ID, COL_TAG,
};
use crate::model::{Cost, ItemEntry, RecipeRecord};
use crate::values::{self, IntRules};

/// Rows 2 and 3 hold notes for whoever edits the sheet
pub const ANNOTATION_ROWS: usize = 2;

/// Text form of a cell. Whole floats print without a fraction.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// True if every cell is empty or whitespace
pub fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Decode every data row following the header.
///
/// `rows` must be positioned just after the header row. The two annotation
/// rows are skipped here; a sheet that ends early simply yields no records.
pub fn decode_rows<'a, I>(mut rows: I, header: &HeaderMap) -> Result<Vec<RecipeRecord>, LoadError>
where
    I: Iterator<Item = &'a [Data]>,
{
    // Row 1 is the header, already consumed
    let mut row_number = 1;
    for _ in rows.by_ref().take(ANNOTATION_ROWS) {
        row_number += 1;
    }

    let decoder = RowDecoder::new(header);
    let mut records = Vec::with_capacity(16);

    for row in rows {
        row_number += 1;
        if row_is_blank(row) {
            continue;
        }
        let record = decoder.decode(row, row_number)?;
        debug!("Row {}: decoded recipe '{}'", row_number, record.recipe_id);
        records.push(record);
    }

    Ok(records)
}

/// Column positions of the fields a record is built from
struct RowDecoder {
    enabled: usize,
    recipe_id: usize,
    result_id: usize,
    result_amount: usize,
    money: usize,
    cost_ids: usize,
    cost_amounts: usize,
    tag: usize,
}

impl RowDecoder {
    fn new(header: &HeaderMap) -> Self {
        RowDecoder {
            enabled: header.index_of(COL_ENABLED),
            recipe_id: header.index_of(COL_RECIPE_ID),
            result_id: header.index_of(COL_RESULT_ID),
            result_amount: header.index_of(COL_RESULT_AMOUNT),
            money: header.index_of(COL_MONEY),
            cost_ids: header.index_of(COL_COST_IDS),
            cost_amounts: header.index_of(COL_COST_AMOUNTS),
            tag: header.index_of(COL_TAG),
        }
    }

    fn decode(&self, row: &[Data], row_number: usize) -> Result<RecipeRecord, LoadError> {
        let cell = |index: usize| row.get(index).map(cell_text).unwrap_or_default();

        let enabled =
            values::parse_bool(&cell(self.enabled)).map_err(|e| e.at(row_number, COL_ENABLED))?;

        let recipe_id = cell(self.recipe_id).trim().to_string();
        if recipe_id.is_empty() {
            return Err(LoadError::MissingRequiredField {
                row: row_number,
                field: COL_RECIPE_ID,
            });
        }

        let result_id = values::parse_i32(&cell(self.result_id), IntRules::DEFAULT)
            .map_err(|e| e.at(row_number, COL_RESULT_ID))?;
        let result_amount = values::parse_i32(&cell(self.result_amount), IntRules::POSITIVE)
            .map_err(|e| e.at(row_number, COL_RESULT_AMOUNT))?;

        let money = values::parse_i64(&cell(self.money), IntRules::ALLOW_ZERO)
            .map_err(|e| e.at(row_number, COL_MONEY))?;

        let cost_ids = values::parse_i32_list(&cell(self.cost_ids))
            .map_err(|e| e.at(row_number, COL_COST_IDS))?;
        let cost_amounts = values::parse_i64_list(&cell(self.cost_amounts), true)
            .map_err(|e| e.at(row_number, COL_COST_AMOUNTS))?;

        if cost_ids.len() != cost_amounts.len() {
            return Err(LoadError::ListLengthMismatch {
                row: row_number,
                ids: cost_ids.len(),
                amounts: cost_amounts.len(),
            });
        }

        let tags = values::split_list(&cell(self.tag));

        Ok(RecipeRecord {
            enabled,
            recipe_id,
            result_item: ItemEntry {
                id: result_id,
                amount: result_amount,
            },
            cost: Cost::from_parallel(money, &cost_ids, &cost_amounts),
            tags,
        })
    }
}
