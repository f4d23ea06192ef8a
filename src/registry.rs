use std::collections::HashSet;

use serde::Serialize;

use crate::error::RegistryError;
use crate::model::{Cost, ItemEntry};

/// A recipe as the host registry stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CraftingFormula {
    /// Derived id, unique within the registry
    pub id: String,
    pub result: ItemEntry,
    pub cost: Cost,
    pub tags: Vec<String>,
    pub require_perk: String,
    pub unlock_by_default: bool,
    pub hide_in_index: bool,
    pub lock_in_demo: bool,
}

/// The live recipe registry recipes are merged into
pub trait RecipeRegistry {
    /// Add a formula. Fails if its id is already present.
    fn register(&mut self, formula: CraftingFormula) -> Result<(), RegistryError>;

    /// Remove every formula whose id is in `ids`, returning how many went
    fn unregister_all(&mut self, ids: &HashSet<String>) -> usize;

    fn contains(&self, id: &str) -> bool;
}

/// Registry backed by an ordered vector
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    formulas: Vec<CraftingFormula>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CraftingFormula> {
        self.formulas.iter().find(|f| f.id == id)
    }

    pub fn formulas(&self) -> &[CraftingFormula] {
        &self.formulas
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

impl RecipeRegistry for InMemoryRegistry {
    fn register(&mut self, formula: CraftingFormula) -> Result<(), RegistryError> {
        if self.contains(&formula.id) {
            return Err(RegistryError::AlreadyExists(formula.id));
        }
        self.formulas.push(formula);
        Ok(())
    }

    fn unregister_all(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.formulas.len();
        self.formulas.retain(|f| !ids.contains(&f.id));
        before - self.formulas.len()
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(id: &str) -> CraftingFormula {
        CraftingFormula {
            id: id.to_string(),
            result: ItemEntry { id: 1, amount: 1 },
            cost: Cost::default(),
            tags: vec![],
            require_perk: String::new(),
            unlock_by_default: true,
            hide_in_index: false,
            lock_in_demo: false,
        }
    }

    #[test]
    fn test_register_rejects_duplicate_ids() {
        let mut registry = InMemoryRegistry::new();
        registry.register(formula("a")).unwrap();
        assert_eq!(
            registry.register(formula("a")),
            Err(RegistryError::AlreadyExists("a".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_all_only_removes_listed_ids() {
        let mut registry = InMemoryRegistry::new();
        for id in ["base", "a", "b"] {
            registry.register(formula(id)).unwrap();
        }

        let ids: HashSet<String> = ["a", "b", "missing"].iter().map(|s| s.to_string()).collect();
        assert_eq!(registry.unregister_all(&ids), 2);
        assert!(registry.contains("base"));
        assert!(!registry.contains("a"));
    }
}
