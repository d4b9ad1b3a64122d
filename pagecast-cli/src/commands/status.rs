//! Status command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::load_corpus;
use anyhow::Result;
use chrono::NaiveDate;
use pagecast_core::{reconcile, CycleId, Extractor, ExtractorConfig, SelectionState, StateStore};
use std::io::Write;

/// Progress through the current cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Cycle containing today
    pub cycle_id: CycleId,
    /// Cycle found on disk, if any
    pub persisted_cycle: Option<CycleId>,
    /// Messages sent this cycle
    pub sent_count: u32,
    /// Weekly quota
    pub quota: u32,
    /// Corpus indices used this cycle, within the corpus
    pub used: usize,
    /// Sentences in the book
    pub corpus_len: usize,
}

impl StatusReport {
    /// Summarise `persisted` as seen on `today`
    pub fn build(
        persisted: Option<SelectionState>,
        today: NaiveDate,
        quota: u32,
        corpus_len: usize,
    ) -> Self {
        let persisted_cycle = persisted.as_ref().map(|s| s.cycle_id);
        let state = reconcile(persisted, &today);
        let used = state
            .used_indices
            .iter()
            .filter(|&&i| i < corpus_len)
            .count();

        Self {
            cycle_id: state.cycle_id,
            persisted_cycle,
            sent_count: state.sent_count,
            quota,
            used,
            corpus_len,
        }
    }

    /// Messages still to go this cycle
    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.sent_count)
    }

    /// Render the report
    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "Cycle:     {}", self.cycle_id)?;
        writeln!(writer, "Sent:      {}/{}", self.sent_count, self.quota)?;
        writeln!(writer, "Remaining: {}", self.remaining())?;
        writeln!(writer, "Used:      {}/{} sentences", self.used, self.corpus_len)?;
        match self.persisted_cycle {
            None => writeln!(writer, "No state file yet; the next run starts a new cycle")?,
            Some(cycle) if cycle != self.cycle_id => writeln!(
                writer,
                "State file is from {cycle}; the next run starts a new cycle"
            )?,
            Some(_) => {}
        }
        Ok(())
    }
}

/// Execute the status command
pub fn execute(config: &CliConfig, today: NaiveDate, writer: &mut impl Write) -> Result<()> {
    let extractor = Extractor::new(ExtractorConfig {
        min_length: config.corpus.min_length,
        ..ExtractorConfig::default()
    })
    .map_err(|e| CliError::Configuration(e.to_string()))?;
    let corpus = load_corpus(&config.corpus.book_file, &extractor)?;
    let persisted = StateStore::new(&config.schedule.state_file)
        .load()
        .map_err(CliError::from)?;

    StatusReport::build(persisted, today, config.schedule.weekly_total, corpus.len())
        .write(writer)
}
