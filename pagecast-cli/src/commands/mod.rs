//! CLI command implementations

use clap::Subcommand;

pub mod generate_config;
pub mod preview;
pub mod reset;
pub mod send;
pub mod status;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Pick the next sentence and post it to the webhook (default)
    Send(send::SendArgs),

    /// Show how the book is split into sentences
    Preview(preview::PreviewArgs),

    /// Show progress through the current week
    Status,

    /// Forget which sentences were sent this week
    Reset,

    /// Print a configuration file with all defaults
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Send(send::SendArgs::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_send() {
        match Commands::default() {
            Commands::Send(args) => assert!(!args.dry_run),
            other => panic!("unexpected default command: {other:?}"),
        }
    }
}
