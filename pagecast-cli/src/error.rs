//! Error handling for the CLI application

use pagecast_core::CoreError;
use thiserror::Error;

/// Operator-facing failure kinds, each with its own exit status
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing webhook address or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Book file missing, unreadable, or without usable sentences
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Webhook rejected the message or could not be reached
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// State file could not be read or written
    #[error("State error: {0}")]
    State(#[from] CoreError),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Configuration(_) => 2,
            CliError::Corpus(_) => 3,
            CliError::Delivery(_) => 4,
            CliError::State(_) => 5,
        }
    }
}

/// Exit status for an error bubbling out of a command
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or(1, CliError::exit_code)
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
