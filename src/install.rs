use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{RecipeSheetConfig, SourceConfig};
use crate::error::LoadError;
use crate::load_with_selector;
use crate::registry::RecipeRegistry;
use crate::session::{RegistrationOptions, RegistrationReport, RegistrationSession};
use crate::workbook::SheetSelector;

/// Workbooks read by [`install`]
#[derive(Debug, Clone)]
pub struct InstallSources {
    /// Always read; missing is an error
    pub default_file: PathBuf,
    /// Read first when it exists; its recipes win over the default workbook
    pub override_file: Option<PathBuf>,
    pub selector: SheetSelector,
}

impl From<&SourceConfig> for InstallSources {
    fn from(config: &SourceConfig) -> Self {
        InstallSources {
            default_file: config.default_file.clone(),
            override_file: config.override_file.clone(),
            selector: SheetSelector {
                name: config.sheet_name.clone(),
                index: config.sheet_index,
            },
        }
    }
}

/// Load the override and default workbooks and register their recipes.
///
/// Every recipe in the override workbook, enabled or not, shadows the
/// default recipe with the same registry id. Either workbook failing to
/// load aborts the install; registry rejections of single recipes do not.
pub fn install<R: RecipeRegistry + ?Sized>(
    registry: &mut R,
    session: &mut RegistrationSession,
    sources: &InstallSources,
) -> Result<RegistrationReport, LoadError> {
    let mut report = RegistrationReport::default();
    let mut provided: HashSet<String> = HashSet::new();

    if let Some(path) = sources.override_file.as_deref() {
        if path.is_file() {
            info!(
                "Found override workbook {}, loading it first",
                path.display()
            );
            let records = load_with_selector(path, &sources.selector)?;
            provided.extend(records.iter().map(|r| session.derive_id(&r.recipe_id)));
            report.merge(session.register_all(registry, &records));
        } else {
            debug!("No override workbook at {}", path.display());
        }
    }

    let records = load_with_selector(&sources.default_file, &sources.selector)?;
    let (shadowed, remaining): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| provided.contains(&session.derive_id(&r.recipe_id)));

    for record in &shadowed {
        debug!(
            "Recipe '{}' comes from the override workbook, skipping default",
            record.recipe_id
        );
        report.overridden.push(session.derive_id(&record.recipe_id));
    }
    report.merge(session.register_all(registry, &remaining));

    info!(
        "Installed {} recipes ({} disabled, {} already present, {} overridden)",
        report.added.len(),
        report.disabled.len(),
        report.skipped_existing.len(),
        report.overridden.len()
    );
    Ok(report)
}

/// Run [`install`] with sources and registration settings taken from the
/// configuration file (see [`RecipeSheetConfig::load`]).
///
/// The returned session is what later removes the installed recipes.
pub fn install_from_config<R: RecipeRegistry + ?Sized>(
    registry: &mut R,
    config_path: Option<&Path>,
) -> Result<(RegistrationSession, RegistrationReport), LoadError> {
    let config = RecipeSheetConfig::load(config_path)?;
    let mut session = RegistrationSession::new(RegistrationOptions::from(&config.registration));
    let report = install(registry, &mut session, &InstallSources::from(&config.source))?;
    Ok((session, report))
}
