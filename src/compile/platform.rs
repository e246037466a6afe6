//! Platform compilation: one specification row in, one fully-formed
//! node descriptor out.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::loader::CompileError;
use super::row::{columns, parse_run_list, SpecRow};
use crate::config::{AddressAllocator, DriverCustomization};

/// Where base images are published.
const BASE_IMAGE_HOST: &str = "https://opscode-vm-bento.s3.amazonaws.com/vagrant/virtualbox";

/// Whether the node needs the provisioning agent, and at which version.
///
/// Compiled output is either a pinned version string or `Required(true)`;
/// a platform never opts out of the agent, so `Required(false)` is never
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AgentRequirement {
    /// A specific agent version requested by the row.
    Pinned(String),
    /// Agent required, version unpinned.
    Required(bool),
}

/// A fully-configured node descriptor for the virtualization driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlatformDescriptor {
    pub name: String,
    pub base_image_name: String,
    pub base_image_url: String,
    pub address: Ipv4Addr,
    pub agent: AgentRequirement,
    pub customizations: BTreeMap<String, u64>,
    pub run_list: Vec<String>,
}

/// Compile one platform row.
///
/// Draws exactly one address from the allocator, so callers must invoke
/// this in row order.
pub fn compile_platform(
    row: &SpecRow,
    allocator: &mut AddressAllocator,
    customization: &DriverCustomization,
) -> Result<PlatformDescriptor, CompileError> {
    let os = require_path_safe(row, columns::OPERATING_SYSTEM)?;
    let version = require_path_safe(row, columns::VERSION)?;
    let name = row.cell(columns::SERVER_NAME).ok_or_else(|| {
        CompileError::InvalidPlatformSpec(format!("missing '{}' cell", columns::SERVER_NAME))
    })?;

    let distro = format!("{os}-{version}");
    let agent = match row.cell(columns::CHEF_VERSION) {
        Some(version) => AgentRequirement::Pinned(version.to_string()),
        None => AgentRequirement::Required(true),
    };

    Ok(PlatformDescriptor {
        name: name.to_string(),
        base_image_name: format!("opscode-{distro}"),
        base_image_url: format!(
            "{BASE_IMAGE_HOST}/opscode_{distro}_chef-provisionerless.box"
        ),
        address: allocator.allocate()?,
        agent,
        customizations: customization.to_map(),
        run_list: parse_run_list(row.get(columns::RUN_LIST).unwrap_or("")),
    })
}

/// Fetch a cell that ends up inside the base-image path. Rejects absent
/// cells and any character that is unsafe in a path segment.
fn require_path_safe<'a>(row: &'a SpecRow, column: &str) -> Result<&'a str, CompileError> {
    let value = row.cell(column).ok_or_else(|| {
        CompileError::InvalidPlatformSpec(format!("missing '{column}' cell"))
    })?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(CompileError::InvalidPlatformSpec(format!(
            "'{column}' cell '{value}' contains characters unsafe in an image path"
        )));
    }
    Ok(value)
}
