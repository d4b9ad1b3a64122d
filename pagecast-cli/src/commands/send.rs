//! Send command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::load_corpus;
use crate::notifier::{DryRunNotifier, Message, Notifier, WebhookNotifier};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use pagecast_core::{reconcile, Extractor, ExtractorConfig, Selector, StateStore};
use rand::Rng;
use std::io;

/// Arguments for the send command
#[derive(Debug, Clone, Default, Args)]
pub struct SendArgs {
    /// Print the payload instead of posting it; the state file is not updated
    #[arg(long)]
    pub dry_run: bool,

    /// Fix the random pick for reproducible runs
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The weekly quota was already reached; nothing was sent
    QuotaMet {
        /// Messages sent this cycle
        sent_count: u32,
        /// Weekly quota
        quota: u32,
    },
    /// A sentence was delivered
    Sent {
        /// Corpus index of the sentence
        index: usize,
        /// Position within the cycle
        ordinal: u32,
        /// Weekly quota
        quota: u32,
    },
}

impl SendArgs {
    /// Execute the send command
    pub fn execute(&self, config: &CliConfig, today: NaiveDate) -> Result<RunOutcome> {
        let mut selector = match self.seed {
            Some(seed) => Selector::seeded(seed),
            None => Selector::from_entropy(),
        };

        let outcome = if self.dry_run {
            let notifier = DryRunNotifier::new(io::stdout().lock(), config.webhook.clone());
            run_once(config, &notifier, &mut selector, today, false)?
        } else {
            // The address is checked before the book or the state are touched
            let url = config.webhook_url()?;
            let notifier = WebhookNotifier::new(url, config.webhook.clone())?;
            run_once(config, &notifier, &mut selector, today, true)?
        };

        match &outcome {
            RunOutcome::QuotaMet { sent_count, quota } => {
                log::info!("Weekly quota already met ({sent_count}/{quota}); nothing to send");
            }
            RunOutcome::Sent {
                index,
                ordinal,
                quota,
            } => {
                log::info!("Sent sentence #{index} ({ordinal}/{quota})");
            }
        }

        Ok(outcome)
    }
}

/// One scheduled run: extract, reconcile, pick, deliver, persist
///
/// The state file is written only after `notifier` reports success and only
/// when `persist` is set.
pub fn run_once<N, R>(
    config: &CliConfig,
    notifier: &N,
    selector: &mut Selector<R>,
    today: NaiveDate,
    persist: bool,
) -> Result<RunOutcome, CliError>
where
    N: Notifier + ?Sized,
    R: Rng,
{
    let extractor = Extractor::new(ExtractorConfig {
        min_length: config.corpus.min_length,
        ..ExtractorConfig::default()
    })
    .map_err(|e| CliError::Configuration(e.to_string()))?;
    let corpus = load_corpus(&config.corpus.book_file, &extractor)?;

    let store = StateStore::new(&config.schedule.state_file);
    let persisted = store.load()?;
    let state = reconcile(persisted, &today);
    log::debug!(
        "Cycle {}: {} sent, {} of {} sentences used",
        state.cycle_id,
        state.sent_count,
        state.used_indices.len(),
        corpus.len()
    );

    let quota = config.schedule.weekly_total;
    if state.quota_met(quota) {
        return Ok(RunOutcome::QuotaMet {
            sent_count: state.sent_count,
            quota,
        });
    }

    let selection = selector.choose(&corpus, &state)?;
    let message = Message::new(selection.sentence.as_str(), selection.ordinal(), quota);
    notifier.notify(&message)?;

    if persist {
        store.save(&selection.state)?;
    }

    Ok(RunOutcome::Sent {
        index: selection.index,
        ordinal: selection.ordinal(),
        quota,
    })
}
