//! The aggregate root over all provisioned nodes.
//!
//! Bulk operations fan out to every owned node and collect per-node
//! results into one report. A failure on one node never prevents the
//! remaining nodes from being attempted, and no failure is silently
//! swallowed - partial failure shows up as an aggregate error naming
//! every failing node.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{info, warn};

use super::instance::{Instance, LifecycleEngine};
use super::node::Node;
use super::{LifecycleError, NodeFailure};
use crate::compile::CompiledConfiguration;

/// Prefix the lifecycle engine puts on instance names. Stripped when
/// indexing nodes, so `infrastructure.node("web-1")` finds the instance
/// the engine calls `nodespec-web-1`.
pub const NODE_NAME_PREFIX: &str = "nodespec-";

pub struct Infrastructure {
    nodes: BTreeMap<String, Node>,
}

impl Infrastructure {
    /// Index instances by normalized name.
    pub fn new(instances: Vec<Box<dyn Instance>>) -> Self {
        let nodes = instances
            .into_iter()
            .map(|instance| {
                let name = instance.name();
                let key = name.strip_prefix(NODE_NAME_PREFIX).unwrap_or(name);
                (key.to_string(), Node::new(instance))
            })
            .collect();
        Self { nodes }
    }

    /// Provision one instance per compiled platform and take ownership
    /// of the resulting node set.
    pub fn build(config: &CompiledConfiguration, engine: &dyn LifecycleEngine) -> Self {
        info!(
            driver = %config.driver_plugin,
            nodes = config.platforms.len(),
            "building infrastructure"
        );
        Self::new(
            config
                .platforms
                .iter()
                .map(|platform| engine.provision(platform))
                .collect(),
        )
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Converge every node. All nodes are attempted; failures are
    /// reported together afterwards.
    pub async fn converge(&mut self) -> Result<(), LifecycleError> {
        let results = join_all(self.nodes.iter_mut().map(|(name, node)| async move {
            (name.clone(), node.converge().await)
        }))
        .await;
        Self::report("converge", results)
    }

    /// Destroy every node. Idempotent: nodes already destroyed are
    /// skipped by their own no-op, so a second bulk destroy succeeds.
    pub async fn destroy(&mut self) -> Result<(), LifecycleError> {
        let results = join_all(self.nodes.iter_mut().map(|(name, node)| async move {
            (name.clone(), node.destroy().await)
        }))
        .await;
        Self::report("destroy", results)
    }

    fn report(
        operation: &'static str,
        results: Vec<(String, Result<(), LifecycleError>)>,
    ) -> Result<(), LifecycleError> {
        let attempted = results.len();
        let failures: Vec<NodeFailure> = results
            .into_iter()
            .filter_map(|(name, result)| {
                result.err().map(|err| {
                    let message = match err {
                        LifecycleError::Operation { message, .. } => message,
                        other => other.to_string(),
                    };
                    NodeFailure { node: name, message }
                })
            })
            .collect();

        if failures.is_empty() {
            info!(operation, attempted, "fan-out complete");
            Ok(())
        } else {
            warn!(operation, attempted, failed = failures.len(), "fan-out had failures");
            Err(LifecycleError::Fanout {
                operation,
                attempted,
                failures,
            })
        }
    }
}
