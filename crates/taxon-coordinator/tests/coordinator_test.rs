//! End-to-end pipeline tests: golden scenarios, review workflow, graph
//! updates, reliability, and invalid input.

use std::sync::Arc;

use taxon_coordinator::{IngestBatch, TaxonConfig, TaxonError, TaxonomyCoordinator};
use taxon_core::errors::InputError;
use test_fixtures::{axis, cluster_around, load_scenario, pair_with_similarity, BatchBuilder, GOLDEN_SCENARIOS};

fn coordinator(config: TaxonConfig) -> TaxonomyCoordinator {
    TaxonomyCoordinator::new(config).unwrap()
}

#[test]
fn golden_scenarios_match_expected_counts() {
    for name in GOLDEN_SCENARIOS {
        let scenario = load_scenario(name);
        let c = coordinator(scenario.config.clone());
        let report = c.ingest_batch(&scenario.batch()).unwrap();

        assert_eq!(report.candidate_count, scenario.expected.candidates, "{name}: candidates");
        assert_eq!(report.promoted_count, scenario.expected.promoted, "{name}: promoted");
        assert_eq!(report.queued_count, scenario.expected.queued, "{name}: queued");
        assert_eq!(report.promoted_ids.len(), report.promoted_count);
        assert_eq!(report.queued_ids.len(), report.queued_count);

        let summary = c.summary().unwrap();
        assert_eq!(summary.total_labels, report.promoted_count, "{name}: labels");
        assert_eq!(summary.review_queue_size, report.queued_count, "{name}: queue");
    }
}

#[test]
fn twelve_identical_records_promote_one_synthesized_label() {
    let scenario = load_scenario("single_cluster_promoted");
    let c = coordinator(scenario.config.clone());
    let report = c.ingest_batch(&scenario.batch()).unwrap();

    assert_eq!(report.candidate_count, 1);
    assert_eq!(report.promoted_count, 1);
    let id = &report.promoted_ids[0];
    let label = c.label(id).unwrap().unwrap();
    let prefix = scenario.expected.promoted_name_prefix.as_deref().unwrap();
    assert_eq!(label.name, format!("{prefix}{}", &id[..8]));
    assert_eq!(label.metadata.size, 12);
    assert!(c.review_queue().unwrap().is_empty());

    let summary = c.summary().unwrap();
    assert_eq!(summary.label_graph_nodes, 1);
    assert_eq!(summary.dimensions, Some(8));
}

#[test]
fn queued_cluster_is_approved_under_manual_name() {
    let scenario = load_scenario("single_cluster_queued");
    let c = coordinator(scenario.config.clone());
    let report = c.ingest_batch(&scenario.batch()).unwrap();
    assert_eq!(report.promoted_count, 0);
    assert_eq!(report.queued_count, 1);

    let id = report.queued_ids[0].clone();
    let entry = c.review_entry(&id).unwrap().unwrap();
    assert_eq!(entry.candidate.size, 12);

    let name = scenario.expected.approve_as.as_deref().unwrap();
    let record = c.approve(&id, Some(name)).unwrap().unwrap();
    assert_eq!(record.name, "manual-label");
    assert!(c.review_queue().unwrap().is_empty());
    assert_eq!(c.labels().unwrap().len(), 1);
    assert_eq!(c.summary().unwrap().label_graph_nodes, 1);

    let metrics = c.metrics().unwrap();
    assert_eq!(metrics.approvals, 1);
    assert_eq!(metrics.graph_rebuilds, 1);
}

#[test]
fn approving_unknown_id_returns_none() {
    let c = coordinator(TaxonConfig::default());
    assert!(c.approve("nope", Some("x")).unwrap().is_none());
    assert_eq!(c.metrics().unwrap().approval_misses, 1);
}

#[test]
fn nearest_label_of_own_centroid_is_itself() {
    let scenario = load_scenario("two_clusters_with_noise");
    let c = coordinator(scenario.config.clone());
    c.ingest_batch(&scenario.batch()).unwrap();

    for label in c.labels().unwrap() {
        let hits = c.nearest_labels(&label.centroid, None).unwrap();
        assert_eq!(hits[0].label_id, label.id);
        assert!(hits[0].distance.abs() < 1e-6);
    }
}

#[test]
fn nearest_labels_on_empty_taxonomy_is_empty() {
    let c = coordinator(TaxonConfig::default());
    assert!(c.nearest_labels(&axis(8, 0), Some(3)).unwrap().is_empty());
}

#[test]
fn promoted_labels_are_connected_and_adjustable() {
    let mut config = TaxonConfig::default();
    config.discovery.min_samples = 2;
    config.promotion.promotion_min_size = 3;
    config.graph.similarity_threshold = 0.6;
    let c = coordinator(config);

    // The two directions are only 0.1 apart in cosine distance, so each
    // goes in its own batch to form its own cluster.
    let (a, b) = pair_with_similarity(8, 0.9);
    c.ingest_batch(&BatchBuilder::new().group(vec![a; 3], Some(0.9), &["alpha"]).build())
        .unwrap();
    c.ingest_batch(&BatchBuilder::new().group(vec![b; 3], Some(0.9), &["beta"]).build())
        .unwrap();

    let w = c.relationship_weight("alpha", "beta").unwrap().unwrap();
    assert!((w - 0.9).abs() < 1e-6);
    assert_eq!(c.related_labels("alpha", None).unwrap()[0].0, "beta");

    assert!(c.adjust_relationship("alpha", "beta", Some(0.2)).unwrap());
    assert_eq!(c.relationship_weight("alpha", "beta").unwrap(), Some(1.0));
    assert_eq!(c.relationships().unwrap().len(), 1);
    assert!(c.graph_dot().unwrap().contains("alpha"));
}

#[test]
fn adjusting_without_edge_is_a_no_op() {
    let c = coordinator(TaxonConfig::default());
    assert!(!c.adjust_relationship("x", "y", None).unwrap());
    assert_eq!(c.relationships().unwrap().len(), 0);
    assert_eq!(c.metrics().unwrap().adjustments_noop, 1);
}

#[test]
fn related_labels_of_unknown_name_is_empty() {
    let c = coordinator(TaxonConfig::default());
    assert!(c.related_labels("ghost", Some(5)).unwrap().is_empty());
}

#[test]
fn batch_of_another_dimensionality_is_rejected() {
    let scenario = load_scenario("single_cluster_promoted");
    let c = coordinator(scenario.config.clone());
    c.ingest_batch(&scenario.batch()).unwrap();

    let wide = BatchBuilder::new().group(vec![axis(16, 0); 12], Some(0.9), &[]).build();
    let err = c.ingest_batch(&wide).unwrap_err();
    assert!(matches!(
        err,
        TaxonError::InvalidInput(InputError::DimensionMismatch { expected: 8, actual: 16, .. })
    ));
    assert_eq!(c.summary().unwrap().total_labels, 1);
}

#[test]
fn queued_only_batch_fixes_dimensionality() {
    let scenario = load_scenario("single_cluster_queued");
    let c = coordinator(scenario.config.clone());
    let report = c.ingest_batch(&scenario.batch()).unwrap();
    assert_eq!(report.promoted_count, 0);
    assert_eq!(c.summary().unwrap().dimensions, Some(8));

    let wide = BatchBuilder::new().group(vec![axis(16, 0); 12], Some(0.9), &[]).build();
    let err = c.ingest_batch(&wide).unwrap_err();
    assert!(matches!(
        err,
        TaxonError::InvalidInput(InputError::DimensionMismatch { expected: 8, actual: 16, .. })
    ));
    assert_eq!(c.summary().unwrap().total_labels, 0);

    let record = c.approve(&report.queued_ids[0], Some("manual")).unwrap().unwrap();
    assert_eq!(record.centroid.len(), 8);
    assert!(c.review_queue().unwrap().is_empty());
}

#[test]
fn invalid_batches_are_rejected_without_mutation() {
    let c = coordinator(TaxonConfig::default());

    let ragged = IngestBatch::from_embeddings(vec![axis(4, 0), axis(5, 0)]);
    assert!(matches!(
        c.ingest_batch(&ragged),
        Err(TaxonError::InvalidInput(InputError::DimensionMismatch { .. }))
    ));

    let empty_vector = IngestBatch::from_embeddings(vec![vec![]]);
    assert!(matches!(
        c.ingest_batch(&empty_vector),
        Err(TaxonError::InvalidInput(InputError::EmptyEmbedding { index: 0 }))
    ));

    let mut stray = IngestBatch::from_embeddings(vec![axis(4, 0)]);
    stray.confidences.insert(7, 0.9);
    assert!(matches!(
        c.ingest_batch(&stray),
        Err(TaxonError::InvalidInput(InputError::UnknownIndex { index: 7, .. }))
    ));

    assert_eq!(c.summary().unwrap().total_labels, 0);
    assert_eq!(c.metrics().unwrap().batches_ingested, 0);
}

#[test]
fn noise_only_batch_changes_nothing() {
    let c = coordinator(TaxonConfig::default());
    let batch = IngestBatch::from_embeddings((0..5).map(|i| axis(8, i)).collect());
    let report = c.ingest_batch(&batch).unwrap();
    assert_eq!(report.candidate_count, 0);
    assert_eq!(c.metrics().unwrap().graph_rebuilds, 0);
    assert_eq!(c.metrics().unwrap().batches_ingested, 1);
}

#[test]
fn ingest_does_not_touch_caller_batch() {
    let scenario = load_scenario("two_clusters_with_noise");
    let batch = scenario.batch();
    let before = batch.clone();
    coordinator(scenario.config.clone()).ingest_batch(&batch).unwrap();
    assert_eq!(batch, before);
}

#[test]
fn agent_reliability_follows_beta_mean() {
    let c = coordinator(TaxonConfig::default());
    assert_eq!(c.confidence_of("parser").unwrap(), 0.5);
    for k in 1..=4 {
        let conf = c.record_outcome("parser", true).unwrap();
        assert!((conf - (1.0 + k as f64) / (2.0 + k as f64)).abs() < 1e-12);
    }
    c.record_outcome("embedder", false).unwrap();

    let all = c.agent_confidences().unwrap();
    assert_eq!(all.len(), 2);
    assert!((all["embedder"] - 1.0 / 3.0).abs() < 1e-12);

    let score = c.reliability_score("parser").unwrap();
    assert_eq!(score.observations, 4);
    assert!(score.credible_interval.0 < score.mean && score.mean < score.credible_interval.1);
    assert!((c.weighted_confidence("parser", 0.5).unwrap() - 0.5 * 5.0 / 6.0).abs() < 1e-12);
    assert_eq!(c.metrics().unwrap().outcomes_recorded, 5);
}

#[test]
fn concurrent_readers_and_writers() {
    let c = Arc::new(coordinator(TaxonConfig {
        discovery: taxon_core::config::DiscoveryConfig { eps: 0.15, min_samples: 2 },
        promotion: taxon_core::config::PromotionConfig {
            promotion_min_size: 3,
            ..Default::default()
        },
        ..TaxonConfig::default()
    }));

    std::thread::scope(|s| {
        for t in 0..4 {
            let c = Arc::clone(&c);
            s.spawn(move || {
                let batch = BatchBuilder::new()
                    .group(cluster_around(&axis(8, t), 4, 0.01, &format!("t{t}")), Some(0.9), &[])
                    .build();
                c.ingest_batch(&batch).unwrap();
                c.record_outcome(&format!("agent-{t}"), true).unwrap();
            });
        }
        for _ in 0..4 {
            let c = Arc::clone(&c);
            s.spawn(move || {
                c.nearest_labels(&axis(8, 0), None).unwrap();
                c.summary().unwrap();
            });
        }
    });

    let summary = c.summary().unwrap();
    assert_eq!(summary.total_labels, 4);
    assert_eq!(summary.label_graph_nodes, 4);
    assert_eq!(c.agent_confidences().unwrap().len(), 4);
}
