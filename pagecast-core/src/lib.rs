//! Sentence-of-the-day selection
//!
//! This crate holds the logic behind Pagecast's scheduled posts: splitting a
//! book into sentences, tracking which ones were sent during the current ISO
//! week, and picking the next unused sentence at random.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pagecast_core::{reconcile, Extractor, Selector};
//!
//! let text = "The first sentence is long enough. The second one is long enough too.";
//! let corpus = Extractor::default().extract(text);
//! assert_eq!(corpus.len(), 2);
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let state = reconcile(None, &today);
//! assert!(!state.quota_met(14));
//!
//! let selection = Selector::seeded(1).choose(&corpus, &state).unwrap();
//! assert_eq!(selection.ordinal(), 1);
//! ```

pub mod error;
pub mod extract;
pub mod selector;
pub mod state;

pub use error::{CoreError, Result};
pub use extract::{extract, Extractor, ExtractorConfig, Sentence};
pub use selector::{Selection, Selector};
pub use state::{reconcile, CycleId, SelectionState, StateStore};
