//! Driver resource customizations.
//!
//! These are global knobs, not per-platform settings: one value set is
//! constructed at process start and every platform compiled in that run
//! shares it. Invalid values are rejected when set, before any
//! compilation begins.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomizationError {
    #[error("invalid memory size {0} MB (must be a positive number of megabytes)")]
    InvalidMemory(u64),

    #[error("invalid CPU execution cap {0}% (must be between 1 and 100)")]
    InvalidCpuCap(u64),
}

/// Optional resource overrides applied uniformly to every provisioned
/// node. Memory is in megabytes; the CPU execution cap is a percentage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverCustomization {
    memory: Option<u64>,
    cpu_execution_cap: Option<u64>,
}

impl DriverCustomization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the memory override in megabytes. Zero is rejected.
    pub fn set_memory(&mut self, megabytes: u64) -> Result<(), CustomizationError> {
        if megabytes == 0 {
            return Err(CustomizationError::InvalidMemory(megabytes));
        }
        self.memory = Some(megabytes);
        Ok(())
    }

    /// Set the CPU execution cap as a percentage, 1-100.
    pub fn set_cpu_execution_cap(&mut self, percent: u64) -> Result<(), CustomizationError> {
        if percent == 0 || percent > 100 {
            return Err(CustomizationError::InvalidCpuCap(percent));
        }
        self.cpu_execution_cap = Some(percent);
        Ok(())
    }

    pub fn memory(&self) -> Option<u64> {
        self.memory
    }

    pub fn cpu_execution_cap(&self) -> Option<u64> {
        self.cpu_execution_cap
    }

    /// The customization map handed to the virtualization driver.
    ///
    /// Contains only fields that were explicitly set - never null or
    /// placeholder entries.
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        let mut map = BTreeMap::new();
        if let Some(memory) = self.memory {
            map.insert("memory".to_string(), memory);
        }
        if let Some(cap) = self.cpu_execution_cap {
            map.insert("cpuexecutioncap".to_string(), cap);
        }
        map
    }
}
