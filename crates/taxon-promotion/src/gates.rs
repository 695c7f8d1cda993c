//! Promotion gates: size, mean confidence, suggestion entropy.
//!
//! A candidate is promoted only when it passes all three; otherwise every
//! failed gate is reported as a [`ReviewReason`].

use serde::{Deserialize, Serialize};

use taxon_core::config::PromotionConfig;
use taxon_core::models::{LabelCandidate, SuggestionHistogram};

/// Why a candidate was sent to review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum ReviewReason {
    TooSmall { size: usize, min: usize },
    LowConfidence { mean_confidence: f64, min: f64 },
    AmbiguousSuggestions { entropy: f64, max: f64 },
}

/// Outcome of running the gates on one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionDecision {
    Promote,
    Review(Vec<ReviewReason>),
}

impl PromotionDecision {
    pub fn is_promote(&self) -> bool {
        matches!(self, Self::Promote)
    }
}

/// Shannon entropy of the histogram divided by `ln(distinct)`.
///
/// Zero or one distinct label yields 0.0. A uniform histogram over
/// `n > 1` labels yields 1.0.
pub fn normalized_entropy(histogram: &SuggestionHistogram) -> f64 {
    let distinct = histogram.distinct();
    let total = histogram.total();
    if distinct <= 1 || total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let entropy: f64 = histogram
        .entries()
        .filter(|(_, count)| *count > 0)
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.ln()
        })
        .sum();
    (entropy / (distinct as f64).ln()).clamp(0.0, 1.0)
}

/// Run all three gates against a candidate.
pub fn decide(candidate: &LabelCandidate, config: &PromotionConfig) -> PromotionDecision {
    let mut reasons = Vec::new();

    if candidate.size < config.promotion_min_size {
        reasons.push(ReviewReason::TooSmall {
            size: candidate.size,
            min: config.promotion_min_size,
        });
    }
    if candidate.mean_confidence < config.promotion_min_confidence {
        reasons.push(ReviewReason::LowConfidence {
            mean_confidence: candidate.mean_confidence,
            min: config.promotion_min_confidence,
        });
    }
    let entropy = normalized_entropy(&candidate.label_suggestions);
    if entropy > config.review_max_label_entropy {
        reasons.push(ReviewReason::AmbiguousSuggestions {
            entropy,
            max: config.review_max_label_entropy,
        });
    }

    if reasons.is_empty() {
        PromotionDecision::Promote
    } else {
        PromotionDecision::Review(reasons)
    }
}
