use std::path::PathBuf;

use crate::workbook::{MemoryWorkbook, SheetSelector};
use crate::{load_from_source, load_with_selector, LoadError, RecipeRecord};

/// Represents where the workbook comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Workbook file on disk
    File(PathBuf),
    /// Sheets already held in memory
    Memory(MemoryWorkbook),
}

/// Builder for configuring and executing a recipe load
#[derive(Debug, Default)]
pub struct RecipeLoaderBuilder {
    source: Option<InputSource>,
    selector: SheetSelector,
}

impl RecipeLoaderBuilder {
    /// Read the workbook at `path`
    ///
    /// # Example
    /// ```
    /// use recipe_sheet::RecipeLoader;
    ///
    /// let builder = RecipeLoader::builder().path("recipes.xlsx");
    /// ```
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::File(path.into()));
        self
    }

    /// Read from an in-memory workbook
    pub fn workbook(mut self, workbook: MemoryWorkbook) -> Self {
        self.source = Some(InputSource::Memory(workbook));
        self
    }

    /// Select the sheet by name, compared case-insensitively
    ///
    /// # Example
    /// ```
    /// use recipe_sheet::RecipeLoader;
    ///
    /// let builder = RecipeLoader::builder()
    ///     .path("recipes.xlsx")
    ///     .sheet_name("Recipes");
    /// ```
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.selector.name = Some(name.into());
        self
    }

    /// Select the sheet by zero-based position
    pub fn sheet_index(mut self, index: usize) -> Self {
        self.selector.index = Some(index);
        self
    }

    /// Execute the load
    ///
    /// # Errors
    /// Returns `LoadError` if:
    /// - No input source was specified
    /// - The workbook cannot be opened or the sheet is missing
    /// - Any column or cell fails validation
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_sheet::RecipeLoader;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipes = RecipeLoader::builder()
    ///     .path("recipes.xlsx")
    ///     .sheet_index(0)
    ///     .load()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(self) -> Result<Vec<RecipeRecord>, LoadError> {
        match self.source {
            Some(InputSource::File(path)) => load_with_selector(path, &self.selector),
            Some(InputSource::Memory(mut workbook)) => {
                load_from_source(&mut workbook, &self.selector)
            }
            None => Err(LoadError::Builder(
                "No input source specified. Use .path() or .workbook()".to_string(),
            )),
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeLoader;

impl RecipeLoader {
    /// Creates a new builder for loading recipes
    pub fn builder() -> RecipeLoaderBuilder {
        RecipeLoaderBuilder::default()
    }
}
