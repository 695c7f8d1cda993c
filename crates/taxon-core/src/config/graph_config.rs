use serde::{Deserialize, Serialize};

use super::defaults;

/// Label graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum centroid cosine similarity for an edge at rebuild time.
    pub similarity_threshold: f64,
    /// Delta applied by `adjust_relationship` when the caller gives none.
    pub default_adjustment: f64,
    /// Default number of neighbors returned by related-label queries.
    pub related_top_k: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            default_adjustment: defaults::DEFAULT_RELATIONSHIP_ADJUSTMENT,
            related_top_k: defaults::DEFAULT_RELATED_TOP_K,
        }
    }
}
