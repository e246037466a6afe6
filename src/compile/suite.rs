//! Suite compilation: resolve each specification row against the
//! declared suite catalog.

use serde::{Deserialize, Serialize};

use super::loader::CompileError;
use super::row::{columns, SpecRow};
use crate::config::SuiteEntry;

/// How a row's suite descriptor is resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiteResolution {
    /// Always clone the catalog's first entry, whatever the row says.
    ///
    /// This matches the historically observed behavior: every suite
    /// descriptor in one compiled output is identical. Kept as the
    /// default for compatibility.
    #[default]
    FirstEntry,
    /// Resolve the catalog entry named by the row's `Suite` cell.
    ByName,
}

/// A compiled configuration-suite descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuiteDescriptor {
    pub name: String,
    pub run_list: Vec<String>,
    pub data_bags_path: Option<String>,
    pub attributes: serde_json::Value,
}

impl From<SuiteEntry> for SuiteDescriptor {
    fn from(entry: SuiteEntry) -> Self {
        Self {
            name: entry.name,
            run_list: entry.run_list,
            data_bags_path: entry.data_bags_path,
            attributes: entry.attributes,
        }
    }
}

/// Compile one suite row. Nothing row-specific leaks into the output in
/// `FirstEntry` mode.
pub fn compile_suite(
    row: &SpecRow,
    catalog: &[SuiteEntry],
    resolution: SuiteResolution,
) -> Result<SuiteDescriptor, CompileError> {
    let entry = match resolution {
        SuiteResolution::FirstEntry => catalog
            .first()
            .ok_or(CompileError::MissingConfigKey("suites"))?,
        SuiteResolution::ByName => {
            let name = row.cell(columns::SUITE).ok_or_else(|| {
                CompileError::MissingSuiteCell(
                    row.cell(columns::SERVER_NAME).unwrap_or("unnamed").to_string(),
                )
            })?;
            catalog
                .iter()
                .find(|entry| entry.name == name)
                .ok_or_else(|| CompileError::UnknownSuite(name.to_string()))?
        }
    };
    Ok(entry.clone().into())
}
