use taxon_reliability::{ConfidenceTracker, ReliabilityTier};

#[test]
fn k_successes_give_laplace_estimate() {
    let mut tracker = ConfidenceTracker::new();
    for k in 1..=20u32 {
        tracker.record_outcome("pattern", true);
        let expected = (1.0 + k as f64) / (2.0 + k as f64);
        assert!((tracker.confidence_of("pattern") - expected).abs() < 1e-12);
    }
}

#[test]
fn mixed_outcomes_follow_beta_mean() {
    let mut tracker = ConfidenceTracker::new();
    for _ in 0..8 {
        tracker.record_outcome("semantic", true);
    }
    for _ in 0..2 {
        tracker.record_outcome("semantic", false);
    }
    // Beta(9, 3)
    assert!((tracker.confidence_of("semantic") - 0.75).abs() < 1e-12);
}

#[test]
fn agents_are_tracked_independently() {
    let mut tracker = ConfidenceTracker::new();
    tracker.record_outcome("a", true);
    tracker.record_outcome("b", false);
    let all = tracker.all_confidences();
    assert_eq!(all.len(), 2);
    assert!(all["a"] > 0.5);
    assert!(all["b"] < 0.5);
}

#[test]
fn score_reports_tier_and_interval() {
    let mut tracker = ConfidenceTracker::new();
    for _ in 0..30 {
        tracker.record_outcome("oracle", true);
    }
    let score = tracker.score("oracle");
    assert_eq!(score.tier, ReliabilityTier::High);
    assert_eq!(score.observations, 30);
    let (low, high) = score.credible_interval;
    assert!(low < score.mean && score.mean < high);
    assert!(high <= 1.0);
}

#[test]
fn unseen_agent_scores_at_prior() {
    let tracker = ConfidenceTracker::new();
    let score = tracker.score("nobody");
    assert_eq!(score.mean, 0.5);
    assert_eq!(score.tier, ReliabilityTier::Low);
    assert_eq!(score.observations, 0);
    assert_eq!(tracker.agent_count(), 0);
}

#[test]
fn tracker_state_roundtrips_through_json() {
    let mut tracker = ConfidenceTracker::new();
    tracker.record_outcome("a", true);
    tracker.record_outcome("b", false);
    let json = serde_json::to_string(&tracker).unwrap();
    let restored: ConfidenceTracker = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.all_confidences(), tracker.all_confidences());
}
