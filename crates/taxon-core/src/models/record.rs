use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LabelCandidate, SuggestionHistogram};

/// Candidate statistics frozen at promotion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMetadata {
    pub mean_confidence: f64,
    pub size: usize,
    pub label_suggestions: SuggestionHistogram,
}

/// A permanent entry in the taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// Inherited from the candidate; stable thereafter.
    pub id: String,
    pub name: String,
    pub centroid: Vec<f32>,
    pub members: Vec<usize>,
    pub created_at: DateTime<Utc>,
    pub metadata: LabelMetadata,
}

impl LabelRecord {
    /// Build a record from a candidate. The candidate is copied, not mutated.
    pub fn from_candidate(candidate: &LabelCandidate, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: candidate.id.clone(),
            name,
            centroid: candidate.centroid.clone(),
            members: candidate.member_indices.clone(),
            created_at,
            metadata: LabelMetadata {
                mean_confidence: candidate.mean_confidence,
                size: candidate.size,
                label_suggestions: candidate.label_suggestions.clone(),
            },
        }
    }

    pub fn dimensions(&self) -> usize {
        self.centroid.len()
    }
}
