//! Mock instance for lifecycle unit tests.

use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::instance::{Instance, InstanceError};

/// Scriptable `Instance` double: records every call and can be told to
/// fail a single operation.
pub struct MockInstance {
    name: String,
    fail_on: Option<&'static str>,
    resolved: Option<Ipv4Addr>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockInstance {
    pub const RESOLVED: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail_on: None,
            resolved: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Shared handle onto the recorded call sequence.
    pub fn calls(&self) -> Arc<Mutex<Vec<&'static str>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, operation: &'static str) -> Result<(), InstanceError> {
        self.calls.lock().unwrap().push(operation);
        if self.fail_on == Some(operation) {
            Err(InstanceError::new(format!("simulated {operation} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Instance for MockInstance {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&mut self) -> Result<(), InstanceError> {
        self.record("create")?;
        self.resolved = Some(Self::RESOLVED);
        Ok(())
    }

    async fn converge(&mut self) -> Result<(), InstanceError> {
        self.record("converge")
    }

    async fn setup(&mut self) -> Result<(), InstanceError> {
        self.record("setup")
    }

    async fn verify(&mut self) -> Result<(), InstanceError> {
        self.record("verify")
    }

    async fn destroy(&mut self) -> Result<(), InstanceError> {
        self.record("destroy")
    }

    async fn test(&mut self) -> Result<(), InstanceError> {
        self.record("test")
    }

    fn resolved_address(&self) -> Option<Ipv4Addr> {
        self.resolved
    }
}
