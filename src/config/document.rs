//! The YAML configuration document.
//!
//! Declares the driver plugin, the network to allocate node addresses
//! from, and the suite catalog. Parsing is pure; file I/O lives in the
//! module root.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One entry of the suite catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuiteEntry {
    pub name: String,

    #[serde(default)]
    pub run_list: Vec<String>,

    #[serde(default)]
    pub data_bags_path: Option<String>,

    /// Free-form attribute tree handed through to the provisioner.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// The complete configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    /// Driver plugin identifier, e.g. "vagrant".
    pub driver: String,

    /// IPv4 CIDR the node addresses are drawn from.
    #[serde(default)]
    pub network: Option<String>,

    /// Legacy field from older documents. Accepted and discarded; it
    /// never influences allocation.
    #[serde(default)]
    pub last_octet: Option<u32>,

    #[serde(default)]
    pub suites: Vec<SuiteEntry>,

    /// Resolve each row's suite by its `Suite` cell instead of always
    /// using the catalog's first entry.
    #[serde(default)]
    pub resolve_suites_by_name: bool,
}

impl Document {
    /// Parse a document from YAML. Pure function - no I/O.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let document: Document = serde_yaml::from_str(content)?;
        if let Some(octet) = document.last_octet {
            debug!(last_octet = octet, "ignoring legacy last_octet field");
        }
        Ok(document)
    }

    /// The declared network, if present and non-empty.
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref().filter(|n| !n.trim().is_empty())
    }
}
