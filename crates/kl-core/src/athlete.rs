//! Raw result records as handed to the engine.
//!
//! A result set is one consistent snapshot: whoever assembles it (mock
//! presets, a results file, a live feed) is responsible for completeness;
//! the engine never mutates it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{AthleteId, RaceStatus};

/// One athlete's result on one distance: the raw time string as published
/// plus the race status. A missing or unparseable time behaves like a
/// non-started distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Raw time string (e.g. `"1:09.86"`); `None` when no time was recorded.
    pub time: Option<String>,
    /// Race status; only `OK` results count.
    #[serde(default)]
    pub status: RaceStatus,
}

impl RaceResult {
    /// A regular timed result.
    pub fn timed(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            status: RaceStatus::Ok,
        }
    }

    /// A result without a countable time.
    pub const fn status_only(status: RaceStatus) -> Self {
        Self { time: None, status }
    }
}

/// One athlete's raw input: identity plus a result per distance key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteResult {
    pub athlete_id: AthleteId,
    pub name: String,
    /// Keyed by [`crate::Distance::key`]; absent keys are unskated distances.
    #[serde(default)]
    pub results: HashMap<String, RaceResult>,
}

impl AthleteResult {
    /// Creates an athlete with no results yet.
    pub fn new(athlete_id: AthleteId, name: impl Into<String>) -> Self {
        Self {
            athlete_id,
            name: name.into(),
            results: HashMap::new(),
        }
    }

    /// Adds a timed `OK` result for a distance key.
    #[must_use]
    pub fn with_time(mut self, key: impl Into<String>, time: impl Into<String>) -> Self {
        self.results.insert(key.into(), RaceResult::timed(time));
        self
    }

    /// Adds a time-less result with the given status.
    #[must_use]
    pub fn with_status(mut self, key: impl Into<String>, status: RaceStatus) -> Self {
        self.results
            .insert(key.into(), RaceResult::status_only(status));
        self
    }

    /// Returns the result entry for a distance key, if any.
    pub fn result(&self, key: &str) -> Option<&RaceResult> {
        self.results.get(key)
    }
}

/// A complete snapshot of raw results for one computation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceResultSet {
    pub athletes: Vec<AthleteResult>,
}

impl RaceResultSet {
    pub fn new(athletes: Vec<AthleteResult>) -> Self {
        Self { athletes }
    }
}
