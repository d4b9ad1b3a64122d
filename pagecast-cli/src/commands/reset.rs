//! Reset command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::Result;
use pagecast_core::StateStore;

/// Execute the reset command; returns whether a state file was removed
pub fn execute(config: &CliConfig) -> Result<bool> {
    let store = StateStore::new(&config.schedule.state_file);
    let removed = store.clear().map_err(CliError::from)?;

    if removed {
        println!("Removed state file {}", store.path().display());
    } else {
        println!("No state file at {}", store.path().display());
    }
    Ok(removed)
}
