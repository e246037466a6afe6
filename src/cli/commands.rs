use anyhow::{Context, Result};
use tracing::debug;

use super::CompileArgs;
use crate::compile::{compile_configuration, CompiledConfiguration};
use crate::config::{load_document_file, load_table_file, DriverCustomization};

/// Compile and print the configuration as pretty JSON.
pub fn run_compile(args: &CompileArgs) -> Result<()> {
    let config = compile_from_args(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Compile and report success without printing the configuration.
pub fn run_validate(args: &CompileArgs) -> Result<()> {
    let config = compile_from_args(args)?;
    println!(
        "OK: {} platform(s), {} suite(s), driver '{}'",
        config.platforms.len(),
        config.suites.len(),
        config.driver_plugin
    );
    Ok(())
}

fn compile_from_args(args: &CompileArgs) -> Result<CompiledConfiguration> {
    let document = load_document_file(&args.config)
        .with_context(|| format!("loading configuration document {}", args.config.display()))?;
    let table = load_table_file(&args.spec)
        .with_context(|| format!("loading specification table {}", args.spec.display()))?;
    debug!(rows = table.len(), "loaded specification table");

    let mut customization = DriverCustomization::new();
    if let Some(megabytes) = args.memory {
        customization.set_memory(megabytes)?;
    }
    if let Some(percent) = args.cpu_cap {
        customization.set_cpu_execution_cap(percent)?;
    }

    let config = compile_configuration(&table, &document, &customization)
        .context("compiling specification")?;
    Ok(config)
}
