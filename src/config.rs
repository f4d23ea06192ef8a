use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecipeSheetConfig {
    /// Which workbooks to read
    #[serde(default)]
    pub source: SourceConfig,
    /// How loaded recipes are registered
    #[serde(default)]
    pub registration: RegistrationConfig,
}

/// Workbook locations and sheet selection
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Workbook shipped with the recipes
    #[serde(default = "default_file")]
    pub default_file: PathBuf,
    /// User workbook whose recipes take precedence, if it exists
    #[serde(default)]
    pub override_file: Option<PathBuf>,
    /// Sheet to read by name (case-insensitive)
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Sheet to read by zero-based position
    #[serde(default)]
    pub sheet_index: Option<usize>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            override_file: None,
            sheet_name: None,
            sheet_index: None,
        }
    }
}

/// Settings applied to every registered recipe
#[derive(Debug, Deserialize, Clone)]
pub struct RegistrationConfig {
    /// Prepended to the recipe id to form the registry id
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    /// Appended to the recipe id to form the registry id
    #[serde(default = "default_id_suffix")]
    pub id_suffix: String,
    #[serde(default)]
    pub require_perk: String,
    #[serde(default = "default_true")]
    pub unlock_by_default: bool,
    #[serde(default)]
    pub hide_in_index: bool,
    #[serde(default)]
    pub lock_in_demo: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            id_suffix: default_id_suffix(),
            require_perk: String::new(),
            unlock_by_default: default_true(),
            hide_in_index: false,
            lock_in_demo: false,
        }
    }
}

// Default value functions
fn default_file() -> PathBuf {
    PathBuf::from("recipes.xlsx")
}

fn default_id_prefix() -> String {
    "recipe_sheet.".to_string()
}

fn default_id_suffix() -> String {
    "_formula".to_string()
}

fn default_true() -> bool {
    true
}

impl RecipeSheetConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SHEET__ prefix
    /// 2. The given file, or recipe-sheet.toml in the current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SHEET__SOURCE__SHEET_NAME
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_config(path)
    }
}

/// Load configuration from file and environment variables
///
/// An explicitly given file must exist; the default `recipe-sheet.toml` is
/// optional.
pub fn load_config(path: Option<&Path>) -> Result<RecipeSheetConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("recipe-sheet").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: RECIPE_SHEET__REGISTRATION__ID_PREFIX
        .add_source(
            Environment::with_prefix("RECIPE_SHEET")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
