//! Non-repeating random selection within a weekly cycle
//!
//! Indices already recorded in the state are skipped until every sentence of
//! the corpus has been used, at which point the used set wraps around so a
//! run always makes progress even when the corpus is smaller than the weekly
//! quota.

use crate::error::{CoreError, Result};
use crate::extract::Sentence;
use crate::state::SelectionState;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Outcome of a single pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The chosen sentence
    pub sentence: &'a Sentence,
    /// Its position in the corpus
    pub index: usize,
    /// State including this pick, to be saved after delivery
    pub state: SelectionState,
}

impl Selection<'_> {
    /// 1-based position of this pick within the cycle
    pub fn ordinal(&self) -> u32 {
        self.state.sent_count
    }
}

/// Random selector over unused corpus indices
#[derive(Debug)]
pub struct Selector<R = StdRng> {
    rng: R,
}

impl Selector<StdRng> {
    /// Selector seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible selector
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Selector<R> {
    /// Selector drawing from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick the next sentence and return the updated state
    ///
    /// `state` itself is left untouched. Recorded indices outside the corpus
    /// (left behind when the book shrank) are ignored when computing what is
    /// still available.
    pub fn choose<'a>(
        &mut self,
        corpus: &'a [Sentence],
        state: &SelectionState,
    ) -> Result<Selection<'a>> {
        if corpus.is_empty() {
            return Err(CoreError::EmptyCorpus);
        }

        let mut next = state.clone();
        let mut available = unused_indices(corpus.len(), &next);
        if available.is_empty() {
            next.used_indices.clear();
            available = (0..corpus.len()).collect();
        }

        let index = *available.choose(&mut self.rng).ok_or(CoreError::EmptyCorpus)?;

        next.used_indices.insert(index);
        next.sent_count = next.sent_count.saturating_add(1);

        Ok(Selection {
            sentence: &corpus[index],
            index,
            state: next,
        })
    }
}

/// Indices in `[0, len)` not yet recorded in `state`
pub fn unused_indices(len: usize, state: &SelectionState) -> Vec<usize> {
    (0..len)
        .filter(|i| !state.used_indices.contains(i))
        .collect()
}
