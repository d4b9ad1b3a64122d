//! Pagecast command-line entry point

use chrono::{Local, NaiveDate};
use clap::Parser;
use pagecast_cli::commands::{self, Commands};
use pagecast_cli::config::{CliConfig, ConfigOverrides};
use pagecast_cli::{exit_code_for, CliResult};
use std::io;
use std::process::ExitCode;

/// Post one sentence of a book per run to a chat webhook
#[derive(Debug, Parser)]
#[command(name = "pagecast", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", env = "PAGECAST_TODAY", global = true, hide = true)]
    today: Option<NaiveDate>,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    fn run(self) -> CliResult<()> {
        let command = self.command.unwrap_or_default();
        if let Commands::GenerateConfig(args) = &command {
            return args.execute();
        }

        let config = CliConfig::resolve(&self.overrides)?;
        log::debug!("Effective configuration: {config:?}");
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        match command {
            Commands::Send(args) => args.execute(&config, today).map(|_| ()),
            Commands::Preview(args) => args.execute(&config, &mut io::stdout().lock()),
            Commands::Status => commands::status::execute(&config, today, &mut io::stdout().lock()),
            Commands::Reset => commands::reset::execute(&config).map(|_| ()),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_logging();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(exit_code_for(&error))
        }
    }
}
