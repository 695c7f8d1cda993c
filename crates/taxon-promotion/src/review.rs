use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taxon_core::models::LabelCandidate;

use crate::gates::ReviewReason;

/// A candidate awaiting manual disposition, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub candidate: LabelCandidate,
    /// Gates the candidate failed.
    pub reasons: Vec<ReviewReason>,
    pub queued_at: DateTime<Utc>,
}

impl ReviewEntry {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}
