//! Pagecast CLI library
//!
//! This library provides the command-line interface that posts one sentence
//! of a book per scheduled run to a chat webhook.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod notifier;

pub use error::{exit_code_for, CliError, CliResult};
