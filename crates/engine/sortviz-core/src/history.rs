//! Bounded ledger of completed runs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of runs kept; older ones are evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Outcome of one completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Session-scoped run number, starting at 1.
    pub sequence: u64,
    /// Display label of the algorithm.
    pub label: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunHistory {
    records: VecDeque<RunRecord>,
    total_runs: u64,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest beyond capacity.
    pub fn record(&mut self, label: impl Into<String>, duration_ms: f64) -> &RunRecord {
        self.total_runs += 1;
        if self.records.len() == HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(RunRecord {
            sequence: self.total_runs,
            label: label.into(),
            duration_ms,
        });
        &self.records[self.records.len() - 1]
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RunRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs completed this session, including evicted ones.
    pub fn total_runs(&self) -> u64 {
        self.total_runs
    }

    pub fn latest(&self) -> Option<&RunRecord> {
        self.records.back()
    }

    /// Forget everything, restarting the sequence at 1.
    pub fn clear(&mut self) {
        self.records.clear();
        self.total_runs = 0;
    }
}
