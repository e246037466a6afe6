pub mod customize;
pub mod document;
pub mod network;

pub use customize::{CustomizationError, DriverCustomization};
pub use document::{Document, SuiteEntry};
pub use network::{AddressAllocator, NetworkError, Subnet};

use std::path::Path;

use thiserror::Error;

use crate::compile::SpecRow;

/// Errors for file I/O operations (separate from pure parsing errors)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

// ============================================================================
// I/O wrappers - thin layer over pure parsing functions
// ============================================================================

/// Load and parse a configuration document from disk.
pub fn load_document_file(path: &Path) -> Result<Document, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let document = Document::from_yaml(&content)?;
    Ok(document)
}

/// Load a specification table from disk: a YAML sequence of rows, each a
/// mapping of column name to cell value.
pub fn load_table_file(path: &Path) -> Result<Vec<SpecRow>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let rows: Vec<SpecRow> = serde_yaml::from_str(&content)?;
    Ok(rows)
}
