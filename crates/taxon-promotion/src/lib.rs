//! # taxon-promotion
//!
//! Decides per candidate: promote into the taxonomy, or queue for review.
//! Owns the append-only taxonomy and the review queue.

pub mod engine;
pub mod gates;
pub mod naming;
pub mod review;
pub mod taxonomy;

pub use engine::{EvaluationOutcome, PromotionEngine};
pub use gates::{normalized_entropy, PromotionDecision, ReviewReason};
pub use review::ReviewEntry;
pub use taxonomy::Taxonomy;
