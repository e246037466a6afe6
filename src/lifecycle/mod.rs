pub mod infrastructure;
pub mod instance;
pub mod node;

#[cfg(test)]
pub mod testing;

pub use infrastructure::{Infrastructure, NODE_NAME_PREFIX};
pub use instance::{Instance, InstanceError, LifecycleEngine};
pub use node::{Node, NodeState};

use thiserror::Error;

/// One node's failure within a fan-out, for the aggregate report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    pub node: String,
    pub message: String,
}

/// Failures surfaced by the lifecycle layer. Always tagged with the
/// node(s) involved.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("'{operation}' failed on node '{node}': {message}")]
    Operation {
        operation: &'static str,
        node: String,
        message: String,
    },

    #[error("'{operation}' failed on {} of {attempted} node(s): {}", .failures.len(), failed_nodes(.failures))]
    Fanout {
        operation: &'static str,
        attempted: usize,
        failures: Vec<NodeFailure>,
    },
}

fn failed_nodes(failures: &[NodeFailure]) -> String {
    failures
        .iter()
        .map(|f| f.node.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
