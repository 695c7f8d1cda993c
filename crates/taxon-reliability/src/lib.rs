//! # taxon-reliability
//!
//! Long-run reliability of the upstream agents feeding the pipeline.
//! Each agent carries Beta pseudo-counts starting at the uniform prior
//! `Beta(1, 1)`; outcomes only ever add to them.

pub mod tier;
pub mod tracker;

pub use tier::ReliabilityTier;
pub use tracker::{AgentOutcome, AgentReliability, ConfidenceTracker, ReliabilityScore};
