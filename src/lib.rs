//! nodespec - compile tabular infrastructure specifications into
//! provisionable node configurations.
//!
//! A specification table (which operating systems × which configuration
//! suites) plus a small YAML document (driver, network, suite catalog)
//! compile deterministically into one node descriptor per platform row:
//! base-image name and URL, a collision-free address from the declared
//! subnet, shared driver customizations, and the row's run-list. The
//! compiled configuration is then handed to an external lifecycle engine
//! and driven through create/converge/verify/destroy.

pub mod cli;
pub mod compile;
pub mod config;
pub mod lifecycle;
