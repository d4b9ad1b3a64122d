//! Generate config command implementation

use crate::config::DEFAULT_TEMPLATE;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, DEFAULT_TEMPLATE)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("Configuration written to {}", path.display());
                eprintln!("Set the webhook address with:");
                eprintln!("   export DISCORD_WEBHOOK_URL=https://...");
            }
            None => print!("{DEFAULT_TEMPLATE}"),
        }
        Ok(())
    }
}
