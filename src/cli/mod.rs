//! CLI module for nodespec
//!
//! Subcommands:
//! - `nodespec compile`  - compile the specification and print the result
//! - `nodespec validate` - compile without printing, report success

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

pub use commands::*;

#[derive(Parser, Debug)]
#[command(name = "nodespec")]
#[command(about = "Compile tabular infrastructure specifications into node configurations")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the specification and print the configuration as JSON
    Compile(CompileArgs),

    /// Check the document and specification table without printing
    Validate(CompileArgs),
}

/// Arguments shared by compile and validate
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Path to the configuration document
    #[arg(long, value_name = "FILE", default_value = ".nodespec.yml")]
    pub config: PathBuf,

    /// Path to the specification table (YAML sequence of rows)
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Memory override in megabytes, applied to every node
    #[arg(long, value_name = "MB")]
    pub memory: Option<u64>,

    /// CPU execution cap in percent (1-100), applied to every node
    #[arg(long, value_name = "PCT")]
    pub cpu_cap: Option<u64>,
}
