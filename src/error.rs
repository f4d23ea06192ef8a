use std::path::PathBuf;

use thiserror::Error;

use crate::workbook::SheetSelector;

/// Errors that can occur while loading recipes from a workbook
///
/// Row numbers are 1-based and count the header row, so they match the row
/// labels a spreadsheet editor shows.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The workbook path does not exist
    #[error("Workbook not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The workbook exists but could not be opened or read
    #[error("Failed to read workbook {}{}: {source}", .path.display(), sheet_suffix(.sheet))]
    Workbook {
        path: PathBuf,
        sheet: Option<String>,
        #[source]
        source: calamine::Error,
    },

    /// No sheet matched the requested name or index
    #[error("Sheet not found: {0}")]
    SheetNotFound(SheetSelector),

    /// The selected sheet has no header row
    #[error("The selected sheet has no rows (header row missing)")]
    EmptyTable,

    /// One or more required columns are absent from the header row
    #[error("Missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Row {row}: {field} is not a recognised boolean: '{raw}' (use TRUE/FALSE, yes/no, 1/0, 是/否)")]
    InvalidBoolean {
        row: usize,
        field: &'static str,
        raw: String,
    },

    #[error("Row {row}: {field} must be an integer, got '{raw}'")]
    InvalidInteger {
        row: usize,
        field: &'static str,
        raw: String,
    },

    #[error("Row {row}: {field}{} must be a positive integer, got {value}", position_suffix(.position))]
    NotPositive {
        row: usize,
        field: &'static str,
        position: Option<usize>,
        value: i64,
    },

    #[error("Row {row}: {field} must not be 0")]
    ZeroNotAllowed { row: usize, field: &'static str },

    #[error("Row {row}: {field} is empty")]
    MissingRequiredField { row: usize, field: &'static str },

    #[error("Row {row}: {field} item {position} is not a valid integer: '{raw}'")]
    InvalidListElement {
        row: usize,
        field: &'static str,
        position: usize,
        raw: String,
    },

    #[error("Row {row}: CostItemID and CostItemAmount have different lengths, IDs={ids}, Amounts={amounts}")]
    ListLengthMismatch {
        row: usize,
        ids: usize,
        amounts: usize,
    },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

fn sheet_suffix(sheet: &Option<String>) -> String {
    match sheet {
        Some(sheet) => format!(" (sheet '{}')", sheet),
        None => String::new(),
    }
}

fn position_suffix(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" (item {})", position),
        None => String::new(),
    }
}

/// Cell-level parse failures, before a row and field are attached
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("not a recognised boolean: '{0}'")]
    InvalidBoolean(String),

    #[error("not an integer: '{0}'")]
    InvalidInteger(String),

    #[error("must be a positive integer, got {value}")]
    NotPositive {
        position: Option<usize>,
        value: i64,
    },

    #[error("must not be 0")]
    ZeroNotAllowed,

    #[error("item {position} is not a valid integer: '{raw}'")]
    InvalidListElement { position: usize, raw: String },
}

impl ValueError {
    /// Attach the row number and column name of the offending cell
    pub fn at(self, row: usize, field: &'static str) -> LoadError {
        match self {
            ValueError::InvalidBoolean(raw) => LoadError::InvalidBoolean { row, field, raw },
            ValueError::InvalidInteger(raw) => LoadError::InvalidInteger { row, field, raw },
            ValueError::NotPositive { position, value } => LoadError::NotPositive {
                row,
                field,
                position,
                value,
            },
            ValueError::ZeroNotAllowed => LoadError::ZeroNotAllowed { row, field },
            ValueError::InvalidListElement { position, raw } => LoadError::InvalidListElement {
                row,
                field,
                position,
                raw,
            },
        }
    }
}

/// Errors reported by a recipe registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A formula with this id is already registered
    #[error("Formula '{0}' is already registered")]
    AlreadyExists(String),
}
