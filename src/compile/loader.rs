//! Specification loading: the full table plus the configuration
//! document in, one immutable `CompiledConfiguration` out.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::platform::{compile_platform, PlatformDescriptor};
use super::row::SpecRow;
use super::suite::{compile_suite, SuiteDescriptor, SuiteResolution};
use crate::config::{AddressAllocator, Document, DriverCustomization, NetworkError, Subnet};

/// Errors raised while compiling a specification.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("missing required configuration key '{0}'")]
    MissingConfigKey(&'static str),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("invalid platform specification: {0}")]
    InvalidPlatformSpec(String),

    #[error("no suite named '{0}' in the suite catalog")]
    UnknownSuite(String),

    #[error("row '{0}' names no suite (a 'Suite' cell is required when resolving suites by name)")]
    MissingSuiteCell(String),
}

/// The compiled output consumed by the lifecycle layer. Immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompiledConfiguration {
    pub driver_plugin: String,
    pub platforms: Vec<PlatformDescriptor>,
    pub suites: Vec<SuiteDescriptor>,
}

/// Compile every row of the specification table against the document.
///
/// Fails fast: a malformed network, a missing config key, or any bad row
/// aborts the whole load - a partial configuration is never returned.
/// Platform and suite sequences both preserve row order; addresses are
/// allocated strictly in that order.
pub fn compile_configuration(
    table: &[SpecRow],
    document: &Document,
    customization: &DriverCustomization,
) -> Result<CompiledConfiguration, CompileError> {
    let network = document
        .network()
        .ok_or(CompileError::MissingConfigKey("network"))?;
    if document.suites.is_empty() {
        return Err(CompileError::MissingConfigKey("suites"));
    }

    let subnet: Subnet = network.parse()?;
    let mut allocator = AddressAllocator::new(subnet);

    let platforms = table
        .iter()
        .map(|row| compile_platform(row, &mut allocator, customization))
        .collect::<Result<Vec<_>, _>>()?;

    let resolution = if document.resolve_suites_by_name {
        SuiteResolution::ByName
    } else {
        SuiteResolution::FirstEntry
    };
    let suites = table
        .iter()
        .map(|row| compile_suite(row, &document.suites, resolution))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        driver = %document.driver,
        subnet = %subnet,
        platforms = platforms.len(),
        "compiled specification"
    );

    Ok(CompiledConfiguration {
        driver_plugin: document.driver.clone(),
        platforms,
        suites,
    })
}
