//! Registration of loaded recipes into a host registry.
//!
//! A [`RegistrationSession`] remembers every id it added so that the same
//! session can later take exactly those recipes back out again.

use std::collections::HashSet;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::RegistrationConfig;
use crate::error::RegistryError;
use crate::model::RecipeRecord;
use crate::registry::{CraftingFormula, RecipeRegistry};

/// How a recipe id maps to its registry id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPolicy {
    pub prefix: String,
    pub suffix: String,
}

impl IdPolicy {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        IdPolicy {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn derive(&self, recipe_id: &str) -> String {
        format!("{}{}{}", self.prefix, recipe_id, self.suffix)
    }
}

/// Fixed settings stamped on every formula a session registers
#[derive(Debug, Clone)]
pub struct RegistrationOptions {
    pub id_policy: IdPolicy,
    pub require_perk: String,
    pub unlock_by_default: bool,
    pub hide_in_index: bool,
    pub lock_in_demo: bool,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        RegistrationOptions::from(&RegistrationConfig::default())
    }
}

impl From<&RegistrationConfig> for RegistrationOptions {
    fn from(config: &RegistrationConfig) -> Self {
        RegistrationOptions {
            id_policy: IdPolicy::new(config.id_prefix.clone(), config.id_suffix.clone()),
            require_perk: config.require_perk.clone(),
            unlock_by_default: config.unlock_by_default,
            hide_in_index: config.hide_in_index,
            lock_in_demo: config.lock_in_demo,
        }
    }
}

/// What happened to each record handed to [`RegistrationSession::register_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// Registry ids that were added
    pub added: Vec<String>,
    /// Recipe ids of records with `enabled == false`
    pub disabled: Vec<String>,
    /// Registry ids that were already present
    pub skipped_existing: Vec<String>,
    /// Registry ids left out because an override workbook provided them
    pub overridden: Vec<String>,
}

impl RegistrationReport {
    pub fn merge(&mut self, other: RegistrationReport) {
        self.added.extend(other.added);
        self.disabled.extend(other.disabled);
        self.skipped_existing.extend(other.skipped_existing);
        self.overridden.extend(other.overridden);
    }
}

/// Tracks the formulas added through it
#[derive(Debug, Default)]
pub struct RegistrationSession {
    options: RegistrationOptions,
    added: HashSet<String>,
}

impl RegistrationSession {
    pub fn new(options: RegistrationOptions) -> Self {
        RegistrationSession {
            options,
            added: HashSet::new(),
        }
    }

    pub fn options(&self) -> &RegistrationOptions {
        &self.options
    }

    pub fn derive_id(&self, recipe_id: &str) -> String {
        self.options.id_policy.derive(recipe_id)
    }

    /// Ids added by this session and not yet removed
    pub fn added_ids(&self) -> &HashSet<String> {
        &self.added
    }

    /// Host-side formula for a record
    pub fn to_formula(&self, record: &RecipeRecord) -> CraftingFormula {
        CraftingFormula {
            id: self.derive_id(&record.recipe_id),
            result: record.result_item,
            cost: record.cost.clone(),
            tags: record.tags.clone(),
            require_perk: self.options.require_perk.clone(),
            unlock_by_default: self.options.unlock_by_default,
            hide_in_index: self.options.hide_in_index,
            lock_in_demo: self.options.lock_in_demo,
        }
    }

    /// Register one record.
    ///
    /// Returns `Ok(None)` for a disabled record and the registry id otherwise.
    pub fn register<R: RecipeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        record: &RecipeRecord,
    ) -> Result<Option<String>, RegistryError> {
        if !record.enabled {
            return Ok(None);
        }

        let formula = self.to_formula(record);
        let id = formula.id.clone();
        registry.register(formula)?;
        self.added.insert(id.clone());
        info!("Recipe {} added", id);
        Ok(Some(id))
    }

    /// Register every record, carrying on past ones the registry rejects.
    pub fn register_all<R: RecipeRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        records: &[RecipeRecord],
    ) -> RegistrationReport {
        let mut report = RegistrationReport::default();

        for record in records {
            match self.register(registry, record) {
                Ok(Some(id)) => report.added.push(id),
                Ok(None) => {
                    debug!("Recipe '{}' is disabled, not registering", record.recipe_id);
                    report.disabled.push(record.recipe_id.clone());
                }
                Err(RegistryError::AlreadyExists(id)) => {
                    warn!("Recipe {} already exists, skipping", id);
                    report.skipped_existing.push(id);
                }
            }
        }

        report
    }

    /// Remove everything this session added. Returns the number removed.
    pub fn remove_all<R: RecipeRegistry + ?Sized>(&mut self, registry: &mut R) -> usize {
        let removed = registry.unregister_all(&self.added);
        info!("Removed {} recipes", removed);
        self.added.clear();
        removed
    }
}
