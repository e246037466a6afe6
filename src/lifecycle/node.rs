//! One provisioned node and its lifecycle state.

use std::net::Ipv4Addr;

use tracing::info;

use super::instance::Instance;
use super::LifecycleError;

/// Lifecycle states of a node. `Destroyed` is reachable from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Unprovisioned,
    Created,
    Converged,
    Verified,
    Destroyed,
}

/// A node wraps one lifecycle-managed instance and tracks which state
/// the instance last reached.
pub struct Node {
    instance: Box<dyn Instance>,
    state: NodeState,
}

impl Node {
    pub fn new(instance: Box<dyn Instance>) -> Self {
        Self {
            instance,
            state: NodeState::Unprovisioned,
        }
    }

    pub fn name(&self) -> &str {
        self.instance.name()
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// The driver-resolved address, available once the instance has been
    /// created. Reads the live instance, not the compiled descriptor.
    pub fn ip(&self) -> Option<Ipv4Addr> {
        self.instance.resolved_address()
    }

    pub async fn create(&mut self) -> Result<(), LifecycleError> {
        self.instance
            .create()
            .await
            .map_err(|e| self.operation_error("create", e))?;
        self.state = NodeState::Created;
        info!(node = %self.name(), "created");
        Ok(())
    }

    pub async fn converge(&mut self) -> Result<(), LifecycleError> {
        self.instance
            .converge()
            .await
            .map_err(|e| self.operation_error("converge", e))?;
        self.state = NodeState::Converged;
        info!(node = %self.name(), "converged");
        Ok(())
    }

    /// Prepares the instance for verification. Does not advance the
    /// state machine; setup sits between converge and verify.
    pub async fn setup(&mut self) -> Result<(), LifecycleError> {
        self.instance
            .setup()
            .await
            .map_err(|e| self.operation_error("setup", e))
    }

    pub async fn verify(&mut self) -> Result<(), LifecycleError> {
        self.instance
            .verify()
            .await
            .map_err(|e| self.operation_error("verify", e))?;
        self.state = NodeState::Verified;
        info!(node = %self.name(), "verified");
        Ok(())
    }

    /// Destroy the instance. A no-op on an already-destroyed node.
    pub async fn destroy(&mut self) -> Result<(), LifecycleError> {
        if self.state == NodeState::Destroyed {
            return Ok(());
        }
        self.instance
            .destroy()
            .await
            .map_err(|e| self.operation_error("destroy", e))?;
        self.state = NodeState::Destroyed;
        info!(node = %self.name(), "destroyed");
        Ok(())
    }

    /// Run the engine's full cycle. Leaves the node destroyed.
    pub async fn test(&mut self) -> Result<(), LifecycleError> {
        self.instance
            .test()
            .await
            .map_err(|e| self.operation_error("test", e))?;
        self.state = NodeState::Destroyed;
        Ok(())
    }

    fn operation_error(
        &self,
        operation: &'static str,
        source: super::instance::InstanceError,
    ) -> LifecycleError {
        LifecycleError::Operation {
            operation,
            node: self.name().to_string(),
            message: source.0,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("state", &self.state)
            .finish()
    }
}
