//! Pipeline counters, exposed read-only by the coordinator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative counters for one coordinator instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    pub batches_ingested: u64,
    pub records_ingested: u64,
    pub candidates_discovered: u64,
    pub labels_promoted: u64,
    pub candidates_queued: u64,
    pub approvals: u64,
    /// Approvals of ids that were not queued.
    pub approval_misses: u64,
    pub graph_rebuilds: u64,
    pub adjustments_applied: u64,
    /// Adjustments between labels with no edge.
    pub adjustments_noop: u64,
    pub outcomes_recorded: u64,
    pub last_ingest_duration_ms: Option<u64>,
    pub last_ingest_at: Option<DateTime<Utc>>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ingest(&mut self, records: usize, candidates: usize, promoted: usize, queued: usize, duration_ms: u64) {
        self.batches_ingested += 1;
        self.records_ingested += records as u64;
        self.candidates_discovered += candidates as u64;
        self.labels_promoted += promoted as u64;
        self.candidates_queued += queued as u64;
        self.last_ingest_duration_ms = Some(duration_ms);
        self.last_ingest_at = Some(Utc::now());
    }

    pub fn record_approval(&mut self, found: bool) {
        if found {
            self.approvals += 1;
        } else {
            self.approval_misses += 1;
        }
    }

    pub fn record_graph_rebuild(&mut self) {
        self.graph_rebuilds += 1;
    }

    pub fn record_adjustment(&mut self, applied: bool) {
        if applied {
            self.adjustments_applied += 1;
        } else {
            self.adjustments_noop += 1;
        }
    }

    pub fn record_outcome(&mut self) {
        self.outcomes_recorded += 1;
    }

    /// Fraction of discovered candidates promoted automatically.
    pub fn promotion_rate(&self) -> f64 {
        if self.candidates_discovered == 0 {
            return 0.0;
        }
        self.labels_promoted as f64 / self.candidates_discovered as f64
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
