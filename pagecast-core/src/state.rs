//! Weekly selection state and its on-disk record
//!
//! The state remembers which corpus indices were already sent during the
//! current ISO week and how many messages went out. It is reconciled against
//! the current date at the start of every run and written back only after a
//! successful delivery.

use crate::error::{CoreError, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Identifier of a weekly cycle, encoded as `iso_year * 100 + iso_week`
///
/// Including the ISO year keeps week 1 of consecutive years distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub u32);

impl CycleId {
    /// Cycle containing `date`
    pub fn for_date<D: Datelike>(date: &D) -> Self {
        let week = date.iso_week();
        // ISO years before 0 never appear in practice
        let year = week.year().max(0) as u32;
        CycleId(year * 100 + week.week())
    }

    /// ISO year component
    pub fn year(self) -> u32 {
        self.0 / 100
    }

    /// ISO week component (1..=53)
    pub fn week(self) -> u32 {
        self.0 % 100
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year(), self.week())
    }
}

/// Selection bookkeeping for one weekly cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Week this record belongs to
    pub cycle_id: CycleId,
    /// Corpus indices already chosen in this cycle
    #[serde(default)]
    pub used_indices: BTreeSet<usize>,
    /// Messages delivered in this cycle
    #[serde(default)]
    pub sent_count: u32,
}

impl SelectionState {
    /// Empty state for `cycle_id`
    pub fn fresh(cycle_id: CycleId) -> Self {
        Self {
            cycle_id,
            used_indices: BTreeSet::new(),
            sent_count: 0,
        }
    }

    /// Check the record's internal consistency
    ///
    /// `sent_count` keeps counting after the used set wraps around on an
    /// exhausted corpus, so it can exceed the number of used indices but
    /// never fall below it.
    pub fn validate(&self) -> Result<()> {
        if (self.sent_count as usize) < self.used_indices.len() {
            return Err(CoreError::InvalidState {
                reason: format!(
                    "sent_count {} is below the {} recorded indices",
                    self.sent_count,
                    self.used_indices.len()
                ),
            });
        }
        let week = self.cycle_id.week();
        if !(1..=53).contains(&week) {
            return Err(CoreError::InvalidState {
                reason: format!("cycle_id {} has no valid ISO week", self.cycle_id.0),
            });
        }
        Ok(())
    }

    /// Whether `weekly_total` messages already went out in this cycle
    pub fn quota_met(&self, weekly_total: u32) -> bool {
        self.sent_count >= weekly_total
    }
}

/// Bring a persisted state in line with the cycle containing `now`
///
/// Returns a fresh state when nothing was persisted or the persisted cycle
/// differs from the current one; otherwise returns the state unchanged.
pub fn reconcile<D: Datelike>(state: Option<SelectionState>, now: &D) -> SelectionState {
    let current = CycleId::for_date(now);
    match state {
        Some(state) if state.cycle_id == current => state,
        _ => SelectionState::fresh(current),
    }
}

/// JSON file holding a [`SelectionState`]
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted state, `None` if the file does not exist
    pub fn load(&self) -> Result<Option<SelectionState>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CoreError::StateIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let state: SelectionState =
            serde_json::from_str(&content).map_err(|source| CoreError::StateFormat {
                path: self.path.clone(),
                source,
            })?;
        state.validate()?;
        Ok(Some(state))
    }

    /// Write `state`, replacing the previous file atomically
    pub fn save(&self, state: &SelectionState) -> Result<()> {
        state.validate()?;

        let json = serde_json::to_string_pretty(state).map_err(|source| CoreError::StateFormat {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        let io_err = |source| CoreError::StateIo {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let written =
            write_synced(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written.map_err(io_err)
    }

    /// Delete the state file; returns whether a file was removed
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(CoreError::StateIo {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Write `contents` followed by a newline and flush it to disk
fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    file.sync_all()
}
