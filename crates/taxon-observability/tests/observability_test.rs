//! Tests for the metrics collector, span macros, and subscriber setup.

use taxon_core::config::ObservabilityConfig;
use taxon_core::errors::TaxonError;
use taxon_observability::tracing_setup::spans::names;
use taxon_observability::{init_tracing, init_tracing_with_filter, PipelineMetrics};

#[test]
fn ingest_counters_accumulate() {
    let mut m = PipelineMetrics::new();
    m.record_ingest(12, 2, 1, 1, 5);
    m.record_ingest(8, 2, 2, 0, 3);

    assert_eq!(m.batches_ingested, 2);
    assert_eq!(m.records_ingested, 20);
    assert_eq!(m.candidates_discovered, 4);
    assert_eq!(m.labels_promoted, 3);
    assert_eq!(m.candidates_queued, 1);
    assert_eq!(m.last_ingest_duration_ms, Some(3));
    assert!(m.last_ingest_at.is_some());
    assert!((m.promotion_rate() - 0.75).abs() < 1e-12);
}

#[test]
fn hits_and_misses_are_split() {
    let mut m = PipelineMetrics::new();
    m.record_approval(true);
    m.record_approval(false);
    m.record_approval(false);
    m.record_adjustment(true);
    m.record_adjustment(false);
    assert_eq!((m.approvals, m.approval_misses), (1, 2));
    assert_eq!((m.adjustments_applied, m.adjustments_noop), (1, 1));
}

#[test]
fn reset_clears_everything() {
    let mut m = PipelineMetrics::new();
    m.record_ingest(1, 1, 1, 0, 1);
    m.record_graph_rebuild();
    m.record_outcome();
    m.reset();
    assert_eq!(m, PipelineMetrics::default());
    assert_eq!(m.promotion_rate(), 0.0);
}

#[test]
fn metrics_serialize_to_json() {
    let mut m = PipelineMetrics::new();
    m.record_graph_rebuild();
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["graph_rebuilds"], 1);
    assert!(json["last_ingest_at"].is_null());
}

#[test]
fn span_macros_use_named_spans() {
    let span = taxon_observability::ingest_span!(12usize);
    let _guard = span.enter();
    let _p = taxon_observability::promotion_span!(2usize);
    let _g = taxon_observability::graph_rebuild_span!(3usize);
    let _a = taxon_observability::approval_span!("abc");
    assert_eq!(names::INGEST, "taxon.ingest");
    assert_eq!(names::APPROVAL, "taxon.approval");
}

#[test]
fn second_initialization_is_an_error() {
    let config = ObservabilityConfig {
        log_env_var: "TAXON_TEST_LOG_UNSET".to_string(),
        ..ObservabilityConfig::default()
    };
    let _ = init_tracing(&config);
    let second = init_tracing_with_filter("debug");
    assert!(matches!(second, Err(TaxonError::ConfigError(_))));
}

#[test]
fn invalid_filter_is_a_config_error() {
    let err = init_tracing_with_filter("taxon=notalevel").unwrap_err();
    assert!(matches!(err, TaxonError::ConfigError(_)));
}
