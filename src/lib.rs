pub mod builder;
pub mod config;
pub mod decoder;
pub mod error;
pub mod header;
pub mod install;
pub mod model;
pub mod registry;
pub mod session;
pub mod values;
pub mod workbook;

use std::path::Path;

use log::info;

pub use builder::{InputSource, RecipeLoader, RecipeLoaderBuilder};
pub use config::RecipeSheetConfig;
pub use error::{LoadError, RegistryError, ValueError};
pub use install::{install, install_from_config, InstallSources};
pub use model::{Cost, CostItem, ItemEntry, RecipeRecord};
pub use registry::{CraftingFormula, InMemoryRegistry, RecipeRegistry};
pub use session::{IdPolicy, RegistrationOptions, RegistrationReport, RegistrationSession};
pub use workbook::{MemoryWorkbook, Sheet, SheetSelector, SheetSource, WorkbookFile};

/// Load every recipe row from a workbook file.
///
/// With neither `sheet_name` nor `sheet_index` the first sheet is read.
/// Any invalid cell fails the whole load; no partial result is returned.
pub fn load(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    sheet_index: Option<usize>,
) -> Result<Vec<RecipeRecord>, LoadError> {
    let selector = SheetSelector {
        name: sheet_name.map(str::to_string),
        index: sheet_index,
    };
    load_with_selector(path, &selector)
}

/// Like [`load`], with the sheet given as a [`SheetSelector`]
pub fn load_with_selector(
    path: impl AsRef<Path>,
    selector: &SheetSelector,
) -> Result<Vec<RecipeRecord>, LoadError> {
    let path = path.as_ref();
    let mut workbook = WorkbookFile::open(path)?;
    let records = load_from_source(&mut workbook, selector)?;
    info!("Loaded {} recipes from {}", records.len(), path.display());
    Ok(records)
}

/// Select a sheet from any source, resolve its header and decode its rows.
pub fn load_from_source<S: SheetSource + ?Sized>(
    source: &mut S,
    selector: &SheetSelector,
) -> Result<Vec<RecipeRecord>, LoadError> {
    let sheet = workbook::select_sheet(source, selector)?;
    let mut rows = sheet.rows();
    let header = header::resolve_header(&mut rows)?;
    decoder::decode_rows(rows, &header)
}
