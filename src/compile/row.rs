//! Specification table rows.
//!
//! A row is one declarative table entry: named text cells keyed by
//! column name. Rows are immutable once read; compilation only ever
//! inspects them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Recognized column names.
pub mod columns {
    pub const OPERATING_SYSTEM: &str = "Operating System";
    pub const VERSION: &str = "Version";
    pub const CHEF_VERSION: &str = "Chef Version";
    pub const RUN_LIST: &str = "Run List";
    pub const SERVER_NAME: &str = "Server Name";
    pub const SUITE: &str = "Suite";
}

/// One row of the specification table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SpecRow(BTreeMap<String, String>);

impl SpecRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell assignment, for constructing rows in code.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Raw cell value, if the column is present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Trimmed cell value; blank cells count as absent.
    pub fn cell(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Split a comma-separated run-list cell into ordered, trimmed tokens.
///
/// A blank cell yields an empty list, not a single empty token.
pub fn parse_run_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
