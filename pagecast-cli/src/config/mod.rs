//! Configuration module
//!
//! Settings come from built-in defaults, an optional TOML file, and command
//! line overrides, in increasing order of precedence. The webhook address is
//! only ever read from the environment.

use crate::error::CliError;
use crate::input::FileReader;
use clap::Args;
use pagecast_core::extract::defaults as extract_defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration constants
pub mod defaults {
    /// Book text read on every run
    pub const BOOK_FILE: &str = "book.txt";
    /// Persisted selection state
    pub const STATE_FILE: &str = "state.json";
    /// Messages per ISO week
    pub const WEEKLY_TOTAL: u32 = 14;
    /// Environment variable holding the webhook address
    pub const URL_ENV: &str = "DISCORD_WEBHOOK_URL";
    /// Webhook request timeout
    pub const TIMEOUT_SECS: u64 = 10;
    /// Heading posted above the sentence
    pub const CONTENT: &str = "Today's sentence:";
    /// Display name of the posting bot
    pub const USERNAME: &str = "Librarian";
    /// Embed side bar color (dark grey)
    pub const COLOR: u32 = 4_210_752;
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Source text settings
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Quota and state settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Webhook message settings
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Source text configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Path of the UTF-8 book file
    pub book_file: PathBuf,

    /// Sentences must be longer than this many characters
    pub min_length: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            book_file: PathBuf::from(defaults::BOOK_FILE),
            min_length: extract_defaults::MIN_LENGTH,
        }
    }
}

/// Weekly quota configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Messages to send per ISO week
    pub weekly_total: u32,

    /// Path of the JSON state file
    pub state_file: PathBuf,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekly_total: defaults::WEEKLY_TOTAL,
            state_file: PathBuf::from(defaults::STATE_FILE),
        }
    }
}

/// Webhook message configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WebhookConfig {
    /// Environment variable holding the webhook URL
    pub url_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Text shown above the embed
    pub content: String,

    /// Name the message is posted under
    pub username: String,

    /// Avatar image for the poster
    pub avatar_url: Option<String>,

    /// Embed color as a decimal RGB value
    pub color: u32,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url_env: defaults::URL_ENV.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
            content: defaults::CONTENT.to_string(),
            username: defaults::USERNAME.to_string(),
            avatar_url: None,
            color: defaults::COLOR,
        }
    }
}

/// Command line overrides shared by all subcommands
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Book file to draw sentences from
    #[arg(long, value_name = "FILE", global = true)]
    pub book: Option<PathBuf>,

    /// State file tracking the current week
    #[arg(long, value_name = "FILE", global = true)]
    pub state: Option<PathBuf>,

    /// Messages per week
    #[arg(long, value_name = "N", global = true)]
    pub weekly_total: Option<u32>,

    /// Minimum sentence length in characters (exclusive)
    #[arg(long, value_name = "CHARS", global = true)]
    pub min_length: Option<usize>,
}

impl CliConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|e| CliError::Configuration(e.to_string()))
    }

    /// Read a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = FileReader::read_text(path)
            .map_err(|e| CliError::Configuration(format!("{e:#}")))?;
        Self::from_toml(&content).map_err(|e| match e {
            CliError::Configuration(msg) => {
                CliError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Build the effective configuration from file and flags
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, CliError> {
        let mut config = match &overrides.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(book) = &overrides.book {
            self.corpus.book_file = book.clone();
        }
        if let Some(state) = &overrides.state {
            self.schedule.state_file = state.clone();
        }
        if let Some(total) = overrides.weekly_total {
            self.schedule.weekly_total = total;
        }
        if let Some(min_length) = overrides.min_length {
            self.corpus.min_length = min_length;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), CliError> {
        if self.schedule.weekly_total == 0 {
            return Err(CliError::Configuration(
                "weekly_total must be greater than 0".into(),
            ));
        }
        if self.webhook.timeout_secs == 0 {
            return Err(CliError::Configuration(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        if self.webhook.url_env.trim().is_empty() {
            return Err(CliError::Configuration("url_env must not be empty".into()));
        }
        Ok(())
    }

    /// Webhook address from the process environment
    pub fn webhook_url(&self) -> Result<String, CliError> {
        self.webhook_url_from(|name| std::env::var(name).ok())
    }

    /// Webhook address from an arbitrary variable lookup
    pub fn webhook_url_from<F>(&self, lookup: F) -> Result<String, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = &self.webhook.url_env;
        match lookup(name) {
            Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
            _ => Err(CliError::Configuration(format!("{name} is not set"))),
        }
    }
}

/// Commented configuration file with every default spelled out
pub const DEFAULT_TEMPLATE: &str = r#"# Pagecast configuration

[corpus]
# UTF-8 text the sentences are drawn from
book_file = "book.txt"
# Sentences must be longer than this many characters
min_length = 20

[schedule]
# Messages per ISO week; further runs in the same week do nothing
weekly_total = 14
# Which sentences were already sent this week
state_file = "state.json"

[webhook]
# The address itself is read from this environment variable
url_env = "DISCORD_WEBHOOK_URL"
timeout_secs = 10
content = "Today's sentence:"
username = "Librarian"
# avatar_url = "https://example.com/avatar.png"
color = 4210752
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let parsed = CliConfig::from_toml(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
[schedule]
weekly_total = 7

[webhook]
username = "Bookworm"
avatar_url = "https://example.com/a.png"
"#,
        )
        .unwrap();

        assert_eq!(config.schedule.weekly_total, 7);
        assert_eq!(config.schedule.state_file, PathBuf::from("state.json"));
        assert_eq!(config.corpus, CorpusConfig::default());
        assert_eq!(config.webhook.username, "Bookworm");
        assert_eq!(
            config.webhook.avatar_url.as_deref(),
            Some("https://example.com/a.png")
        );
        assert_eq!(config.webhook.color, defaults::COLOR);
    }

    #[test]
    fn test_invalid_toml() {
        let result = CliConfig::from_toml("[schedule\nweekly_total = ");
        assert!(matches!(result, Err(CliError::Configuration(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = CliConfig::from_file(Path::new("/nonexistent/pagecast.toml"));
        assert!(matches!(result, Err(CliError::Configuration(_))));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pagecast.toml");
        fs::write(
            &path,
            "[corpus]\nbook_file = \"from-file.txt\"\nmin_length = 30\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            config: Some(path),
            book: Some(PathBuf::from("from-flag.txt")),
            weekly_total: Some(3),
            ..ConfigOverrides::default()
        };
        let config = CliConfig::resolve(&overrides).unwrap();

        assert_eq!(config.corpus.book_file, PathBuf::from("from-flag.txt"));
        assert_eq!(config.corpus.min_length, 30);
        assert_eq!(config.schedule.weekly_total, 3);
    }

    #[test]
    fn test_zero_weekly_total_rejected() {
        let overrides = ConfigOverrides {
            weekly_total: Some(0),
            ..ConfigOverrides::default()
        };
        let result = CliConfig::resolve(&overrides);
        assert!(matches!(result, Err(CliError::Configuration(msg)) if msg.contains("weekly_total")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CliConfig::default();
        config.webhook.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webhook_url_lookup() {
        let config = CliConfig::default();
        let url = config
            .webhook_url_from(|name| {
                assert_eq!(name, "DISCORD_WEBHOOK_URL");
                Some(" https://hooks.example/1 ".to_string())
            })
            .unwrap();
        assert_eq!(url, "https://hooks.example/1");
    }

    #[test]
    fn test_webhook_url_missing_or_blank() {
        let config = CliConfig::default();
        assert!(config.webhook_url_from(|_| None).is_err());

        let error = config
            .webhook_url_from(|_| Some("   ".to_string()))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Configuration error: DISCORD_WEBHOOK_URL is not set"
        );
    }

    #[test]
    fn test_custom_url_env() {
        let mut config = CliConfig::default();
        config.webhook.url_env = "MY_HOOK".to_string();
        let url = config
            .webhook_url_from(|name| (name == "MY_HOOK").then(|| "https://x".to_string()))
            .unwrap();
        assert_eq!(url, "https://x");
    }
}
