//! The seam to the external lifecycle engine.
//!
//! The engine that actually creates and destroys virtualized nodes is a
//! collaborator, not part of this crate. `Instance` is the narrow
//! capability set a lifecycle-managed instance must implement;
//! `LifecycleEngine` turns compiled platform descriptors into instances.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use thiserror::Error;

use crate::compile::PlatformDescriptor;

/// An opaque failure reported by the lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InstanceError(pub String);

impl InstanceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// One lifecycle-managed instance.
#[async_trait]
pub trait Instance: Send {
    /// The engine's name for this instance, usually prefixed.
    fn name(&self) -> &str;

    async fn create(&mut self) -> Result<(), InstanceError>;
    async fn converge(&mut self) -> Result<(), InstanceError>;
    async fn setup(&mut self) -> Result<(), InstanceError>;
    async fn verify(&mut self) -> Result<(), InstanceError>;
    async fn destroy(&mut self) -> Result<(), InstanceError>;

    /// The engine's full cycle: destroy, create, converge, setup,
    /// verify, destroy.
    async fn test(&mut self) -> Result<(), InstanceError>;

    /// The address the driver actually assigned, populated after
    /// `create()`. Authoritative at runtime - the compiled descriptor
    /// only records the requested address.
    fn resolved_address(&self) -> Option<Ipv4Addr>;
}

/// Provisions one instance per compiled platform descriptor.
pub trait LifecycleEngine: Send + Sync {
    fn provision(&self, platform: &PlatformDescriptor) -> Box<dyn Instance>;
}
