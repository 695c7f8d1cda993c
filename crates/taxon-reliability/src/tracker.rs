//! ConfidenceTracker: per-agent Beta pseudo-counts fed by binary outcomes.
//!
//! Confidence formula: `success_weight / (success_weight + failure_weight)`.
//! An agent with `k` successes and no failures sits at `(1 + k) / (2 + k)`.
//! Counts never decrease, so confidence is a cumulative estimate, not a
//! sliding window.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};
use tracing::debug;

use taxon_core::constants::DEFAULT_RECORD_CONFIDENCE;

use crate::tier::ReliabilityTier;

/// The most recent outcome an agent reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub success: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Beta pseudo-counts for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReliability {
    pub success_weight: f64,
    pub failure_weight: f64,
    pub last_outcome: Option<AgentOutcome>,
}

impl AgentReliability {
    /// The uniform prior `Beta(1, 1)`.
    pub fn uniform_prior() -> Self {
        Self {
            success_weight: 1.0,
            failure_weight: 1.0,
            last_outcome: None,
        }
    }

    fn total(&self) -> Option<f64> {
        let total = self.success_weight + self.failure_weight;
        (total.is_finite() && total > 0.0).then_some(total)
    }

    /// Posterior mean. Unusable pseudo-counts read as the default confidence.
    pub fn confidence(&self) -> f64 {
        match self.total() {
            Some(total) => (self.success_weight / total).clamp(0.0, 1.0),
            None => DEFAULT_RECORD_CONFIDENCE,
        }
    }

    /// Posterior variance; 0.25 for unusable pseudo-counts.
    pub fn variance(&self) -> f64 {
        match self.total() {
            Some(n) => (self.success_weight * self.failure_weight / (n * n * (n + 1.0))).max(0.0),
            None => 0.25,
        }
    }

    /// Equal-tailed interval holding `level` of the posterior mass.
    /// `(0, 1)` when `statrs` rejects the pseudo-counts.
    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        let Ok(posterior) = Beta::new(self.success_weight, self.failure_weight) else {
            return (0.0, 1.0);
        };
        let tail = (1.0 - level.clamp(0.0, 1.0)) / 2.0;
        let bound = |p: f64, fallback: f64| {
            let x = posterior.inverse_cdf(p);
            if x.is_finite() {
                x.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        (bound(tail, 0.0), bound(1.0 - tail, 1.0))
    }

    /// Number of outcomes recorded on top of the prior.
    pub fn observations(&self) -> u64 {
        (self.success_weight + self.failure_weight - 2.0).max(0.0).round() as u64
    }
}

impl Default for AgentReliability {
    fn default() -> Self {
        Self::uniform_prior()
    }
}

/// Posterior summary for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityScore {
    pub mean: f64,
    pub variance: f64,
    /// 95% credible interval.
    pub credible_interval: (f64, f64),
    pub tier: ReliabilityTier,
    pub observations: u64,
}

/// In-memory reliability map keyed by agent id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceTracker {
    agents: BTreeMap<String, AgentReliability>,
}

impl ConfidenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from previously exported state.
    pub fn from_agents(agents: BTreeMap<String, AgentReliability>) -> Self {
        Self { agents }
    }

    /// Record one outcome, initializing the agent at the uniform prior on
    /// first sight. Returns the agent's updated confidence.
    pub fn record_outcome(&mut self, agent_id: &str, success: bool) -> f64 {
        let state = self.agents.entry(agent_id.to_string()).or_default();
        if success {
            state.success_weight += 1.0;
        } else {
            state.failure_weight += 1.0;
        }
        state.last_outcome = Some(AgentOutcome {
            success,
            recorded_at: Utc::now(),
        });

        let confidence = state.confidence();
        debug!(
            agent_id,
            success,
            success_weight = state.success_weight,
            failure_weight = state.failure_weight,
            confidence,
            "recorded agent outcome"
        );
        confidence
    }

    /// Confidence for an agent; 0.5 for agents never seen. Never mutates.
    pub fn confidence_of(&self, agent_id: &str) -> f64 {
        self.agents
            .get(agent_id)
            .map(AgentReliability::confidence)
            .unwrap_or(DEFAULT_RECORD_CONFIDENCE)
    }

    /// Full state for an agent, if it has reported.
    pub fn reliability(&self, agent_id: &str) -> Option<&AgentReliability> {
        self.agents.get(agent_id)
    }

    /// Posterior summary; unseen agents are scored at the uniform prior.
    pub fn score(&self, agent_id: &str) -> ReliabilityScore {
        let prior = AgentReliability::uniform_prior();
        let state = self.agents.get(agent_id).unwrap_or(&prior);
        let mean = state.confidence();
        ReliabilityScore {
            mean,
            variance: state.variance(),
            credible_interval: state.credible_interval(0.95),
            tier: ReliabilityTier::from_confidence(mean),
            observations: state.observations(),
        }
    }

    /// Scale an agent-supplied confidence by the agent's reliability.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxon_reliability::ConfidenceTracker;
    ///
    /// let mut tracker = ConfidenceTracker::new();
    /// tracker.record_outcome("parser", true);
    /// tracker.record_outcome("parser", true);
    /// // confidence = 3/4
    /// let weighted = tracker.weighted_confidence("parser", 0.8);
    /// assert!((weighted - 0.6).abs() < 1e-9);
    /// ```
    pub fn weighted_confidence(&self, agent_id: &str, raw_confidence: f64) -> f64 {
        (raw_confidence * self.confidence_of(agent_id)).clamp(0.0, 1.0)
    }

    /// Confidence of every agent that has reported, sorted by agent id.
    pub fn all_confidences(&self) -> BTreeMap<String, f64> {
        self.agents
            .iter()
            .map(|(id, state)| (id.clone(), state.confidence()))
            .collect()
    }

    /// Every tracked agent's state.
    pub fn agents(&self) -> &BTreeMap<String, AgentReliability> {
        &self.agents
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_agent_reads_prior_mean_without_mutation() {
        let tracker = ConfidenceTracker::new();
        assert_eq!(tracker.confidence_of("ghost"), 0.5);
        assert_eq!(tracker.agent_count(), 0);
        assert!(tracker.reliability("ghost").is_none());
    }

    #[test]
    fn first_outcome_starts_from_uniform_prior() {
        let mut tracker = ConfidenceTracker::new();
        let c = tracker.record_outcome("log-agent", false);
        assert!((c - 1.0 / 3.0).abs() < 1e-12);
        let state = tracker.reliability("log-agent").unwrap();
        assert_eq!(state.success_weight, 1.0);
        assert_eq!(state.failure_weight, 2.0);
        assert_eq!(state.last_outcome.as_ref().map(|o| o.success), Some(false));
    }

    #[test]
    fn observations_exclude_the_prior() {
        let mut tracker = ConfidenceTracker::new();
        for _ in 0..4 {
            tracker.record_outcome("a", true);
        }
        tracker.record_outcome("a", false);
        assert_eq!(tracker.reliability("a").unwrap().observations(), 5);
    }

    fn counts(success_weight: f64, failure_weight: f64) -> AgentReliability {
        AgentReliability {
            success_weight,
            failure_weight,
            last_outcome: None,
        }
    }

    #[test]
    fn unusable_counts_fall_back() {
        let zero = counts(0.0, 0.0);
        assert_eq!(zero.confidence(), 0.5);
        assert_eq!(zero.variance(), 0.25);
        assert_eq!(counts(-1.0, 1.0).credible_interval(0.95), (0.0, 1.0));
    }

    #[test]
    fn evidence_narrows_the_posterior() {
        let (few, many) = (counts(2.0, 2.0), counts(40.0, 40.0));
        assert!(many.variance() < few.variance());
        let (l1, h1) = few.credible_interval(0.95);
        let (l2, h2) = many.credible_interval(0.95);
        assert!(h2 - l2 < h1 - l1);
        assert!(l2 < 0.5 && h2 > 0.5);
    }
}
