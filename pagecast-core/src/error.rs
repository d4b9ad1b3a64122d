//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by extraction, selection and state persistence
#[derive(Error, Debug)]
pub enum CoreError {
    /// The state file exists but could not be read or written
    #[error("state file I/O error at {path}: {source}")]
    StateIo {
        /// Location of the state file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The state file is not a valid serialized selection state
    #[error("malformed state file {path}: {source}")]
    StateFormat {
        /// Location of the state file
        path: PathBuf,
        /// Underlying decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// A decoded state violates its own invariants
    #[error("invalid selection state: {reason}")]
    InvalidState {
        /// What was wrong with the record
        reason: String,
    },

    /// Selection was requested against a corpus with no sentences
    #[error("corpus contains no sentences")]
    EmptyCorpus,

    /// Extractor settings that cannot produce a sensible split
    #[error("invalid extractor configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
