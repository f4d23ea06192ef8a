use serde::{Deserialize, Serialize};

/// One validated row of a recipe workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Whether the recipe should be registered at all
    pub enabled: bool,
    /// Trimmed, non-empty identifier taken from the `ID` column
    pub recipe_id: String,
    pub result_item: ItemEntry,
    pub cost: Cost,
    /// Free-form tags in source order, possibly empty
    pub tags: Vec<String>,
}

/// The item a recipe produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: i32,
    /// Always greater than zero
    pub amount: i32,
}

/// What crafting a recipe consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    /// Currency amount, zero allowed
    pub money: i64,
    /// Consumed items in the order they appear in the source cells
    pub items: Vec<CostItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: i32,
    /// Always greater than zero
    pub amount: i64,
}

impl Cost {
    /// Pair up consumed item ids with their amounts.
    ///
    /// Callers check that both lists have the same length first; extra
    /// entries on either side would otherwise be dropped.
    pub fn from_parallel(money: i64, ids: &[i32], amounts: &[i64]) -> Self {
        let items = ids
            .iter()
            .zip(amounts)
            .map(|(&id, &amount)| CostItem { id, amount })
            .collect();
        Cost { money, items }
    }
}
