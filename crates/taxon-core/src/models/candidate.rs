use serde::{Deserialize, Serialize};

use super::SuggestionHistogram;

/// A cluster found in one batch, awaiting promotion or review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCandidate {
    /// Unique id. Carried over to the label if the candidate is promoted.
    pub id: String,
    /// Caller indices of the member records, sorted ascending.
    pub member_indices: Vec<usize>,
    /// Component-wise mean of the member embeddings.
    pub centroid: Vec<f32>,
    /// Number of members.
    pub size: usize,
    /// Mean of the members' confidences.
    pub mean_confidence: f64,
    /// Suggested labels across all members.
    pub label_suggestions: SuggestionHistogram,
}
