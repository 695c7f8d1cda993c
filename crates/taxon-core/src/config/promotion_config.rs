use serde::{Deserialize, Serialize};

use super::defaults;

/// Promotion gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PromotionConfig {
    /// Minimum cluster size for automatic promotion.
    pub promotion_min_size: usize,
    /// Minimum mean member confidence for automatic promotion.
    pub promotion_min_confidence: f64,
    /// Maximum normalized entropy of the suggestion histogram.
    pub review_max_label_entropy: f64,
    /// Default number of matches returned by nearest-label queries.
    pub nearest_top_k: usize,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            promotion_min_size: defaults::DEFAULT_PROMOTION_MIN_SIZE,
            promotion_min_confidence: defaults::DEFAULT_PROMOTION_MIN_CONFIDENCE,
            review_max_label_entropy: defaults::DEFAULT_REVIEW_MAX_LABEL_ENTROPY,
            nearest_top_k: defaults::DEFAULT_NEAREST_TOP_K,
        }
    }
}
