//! TaxonomyCoordinator: one pipeline entry point plus read-side queries.
//!
//! Lock order is taxonomy, then tracker, then metrics.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use tracing::{debug, info};

use taxon_core::config::TaxonConfig;
use taxon_core::errors::{InputError, TaxonError, TaxonResult};
use taxon_core::models::{IngestBatch, IngestReport, LabelMatch, LabelRecord, TaxonomySummary};
use taxon_core::traits::IClusterer;
use taxon_discovery::ClusterDiscovery;
use taxon_graph::RelationshipEdge;
use taxon_observability::PipelineMetrics;
use taxon_promotion::ReviewEntry;
use taxon_reliability::{ConfidenceTracker, ReliabilityScore};

use crate::state::TaxonomyState;

/// Owns one taxonomy aggregate and the agent reliability map.
///
/// `Send + Sync`: share it behind an `Arc`. Writes (`ingest_batch`,
/// `approve`, `adjust_relationship`) are serialized; queries run
/// concurrently with each other.
pub struct TaxonomyCoordinator {
    config: TaxonConfig,
    discovery: ClusterDiscovery,
    state: RwLock<TaxonomyState>,
    tracker: RwLock<ConfidenceTracker>,
    metrics: Mutex<PipelineMetrics>,
}

impl TaxonomyCoordinator {
    /// Validate `config` and start with an empty taxonomy.
    pub fn new(config: TaxonConfig) -> TaxonResult<Self> {
        config.validate()?;
        let discovery = ClusterDiscovery::new(&config.discovery);
        let state = TaxonomyState::new(&config);
        Ok(Self::assemble(config, discovery, state, ConfidenceTracker::new()))
    }

    /// Like [`new`](Self::new), with a custom clustering backend.
    pub fn with_clusterer(config: TaxonConfig, clusterer: Box<dyn IClusterer>) -> TaxonResult<Self> {
        config.validate()?;
        let discovery = ClusterDiscovery::with_clusterer(clusterer);
        let state = TaxonomyState::new(&config);
        Ok(Self::assemble(config, discovery, state, ConfidenceTracker::new()))
    }

    pub(crate) fn assemble(
        config: TaxonConfig,
        discovery: ClusterDiscovery,
        state: TaxonomyState,
        tracker: ConfidenceTracker,
    ) -> Self {
        info!(
            clusterer = discovery.clusterer_name(),
            eps = config.discovery.eps,
            min_samples = config.discovery.min_samples,
            "coordinator: ready"
        );
        Self {
            config,
            discovery,
            state: RwLock::new(state),
            tracker: RwLock::new(tracker),
            metrics: Mutex::new(PipelineMetrics::new()),
        }
    }

    pub fn config(&self) -> &TaxonConfig {
        &self.config
    }

    // --- Pipeline ---

    /// Discover candidates in `batch`, promote or queue each, and connect
    /// newly promoted labels in the graph with a single rebuild.
    ///
    /// An empty batch, invalid records, or records whose dimensionality
    /// differs from the instance's are [`InputError`]s; nothing is mutated.
    /// The first accepted batch fixes the dimensionality, even if every
    /// candidate is queued.
    pub fn ingest_batch(&self, batch: &IngestBatch) -> TaxonResult<IngestReport> {
        let span = taxon_observability::ingest_span!(batch.len());
        let _guard = span.enter();
        let started = Instant::now();

        if batch.is_empty() {
            return Err(InputError::EmptyBatch.into());
        }
        let dims = batch.validate()?;
        self.read_state()?
            .promotion
            .check_dimensions(batch.records[0].index, dims)?;

        let candidates = self.discovery.discover(batch)?;
        let candidate_count = candidates.len();

        let mut state = self.write_state()?;
        // Another writer may have fixed the dimensionality since the read above.
        state
            .promotion
            .fix_dimensions(batch.records[0].index, dims)?;

        let outcome = {
            let span = taxon_observability::promotion_span!(candidate_count);
            let _guard = span.enter();
            state.promotion.evaluate(candidates)?
        };
        let rebuilt = state.connect(&outcome.promoted);
        drop(state);

        let report = IngestReport {
            candidate_count,
            promoted_count: outcome.promoted.len(),
            queued_count: outcome.queued.len(),
            promoted_ids: outcome.promoted.iter().map(|r| r.id.clone()).collect(),
            queued_ids: outcome.queued.iter().map(|c| c.id.clone()).collect(),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        {
            let mut metrics = self.lock_metrics()?;
            metrics.record_ingest(
                batch.len(),
                report.candidate_count,
                report.promoted_count,
                report.queued_count,
                elapsed_ms,
            );
            if rebuilt {
                metrics.record_graph_rebuild();
            }
        }

        info!(
            records = batch.len(),
            candidates = report.candidate_count,
            promoted = report.promoted_count,
            queued = report.queued_count,
            elapsed_ms,
            "ingest: batch complete"
        );
        Ok(report)
    }

    // --- Review workflow ---

    /// Every pending review entry, ordered by candidate id.
    pub fn review_queue(&self) -> TaxonResult<Vec<ReviewEntry>> {
        Ok(self.read_state()?.promotion.review_queue().values().cloned().collect())
    }

    pub fn review_entry(&self, candidate_id: &str) -> TaxonResult<Option<ReviewEntry>> {
        Ok(self.read_state()?.promotion.review_entry(candidate_id).cloned())
    }

    /// Approve a queued candidate. A blank `override_name` falls back to
    /// the synthesized name. Returns `Ok(None)` if `candidate_id` is not
    /// queued. The new label joins the graph and relationships are rebuilt.
    pub fn approve(&self, candidate_id: &str, override_name: Option<&str>) -> TaxonResult<Option<LabelRecord>> {
        let span = taxon_observability::approval_span!(candidate_id);
        let _guard = span.enter();

        let mut state = self.write_state()?;
        let approved = state.promotion.approve(candidate_id, override_name)?;
        let rebuilt = match &approved {
            Some(record) => state.connect(std::slice::from_ref(record)),
            None => false,
        };
        drop(state);

        let mut metrics = self.lock_metrics()?;
        metrics.record_approval(approved.is_some());
        if rebuilt {
            metrics.record_graph_rebuild();
        }
        Ok(approved)
    }

    // --- Taxonomy queries ---

    /// Closest labels to `embedding`, ascending by cosine distance.
    /// `top_k` defaults to `promotion.nearest_top_k`.
    pub fn nearest_labels(&self, embedding: &[f32], top_k: Option<usize>) -> TaxonResult<Vec<LabelMatch>> {
        let top_k = top_k.unwrap_or(self.config.promotion.nearest_top_k);
        self.read_state()?.promotion.nearest_labels(embedding, top_k)
    }

    pub fn label(&self, id: &str) -> TaxonResult<Option<LabelRecord>> {
        Ok(self.read_state()?.promotion.label(id).cloned())
    }

    /// All labels in promotion order.
    pub fn labels(&self) -> TaxonResult<Vec<LabelRecord>> {
        Ok(self.read_state()?.promotion.labels().to_vec())
    }

    pub fn summary(&self) -> TaxonResult<TaxonomySummary> {
        Ok(self.read_state()?.summary())
    }

    // --- Graph ---

    /// Neighbors of label `name`, descending by weight. `top_k` defaults to
    /// `graph.related_top_k`. Unknown names yield an empty list.
    pub fn related_labels(&self, name: &str, top_k: Option<usize>) -> TaxonResult<Vec<(String, f64)>> {
        let top_k = top_k.unwrap_or(self.config.graph.related_top_k);
        Ok(self.read_state()?.graph.related_labels(name, top_k))
    }

    /// Reinforce (or weaken) an existing relationship. `delta` defaults to
    /// `graph.default_adjustment`. Returns `Ok(false)` when the labels share
    /// no edge; no edge is ever created here.
    pub fn adjust_relationship(&self, a: &str, b: &str, delta: Option<f64>) -> TaxonResult<bool> {
        let delta = delta.unwrap_or(self.config.graph.default_adjustment);
        if !delta.is_finite() {
            return Err(InputError::InvalidQuery {
                reason: format!("adjustment delta {delta} is not finite"),
            }
            .into());
        }
        let applied = self.write_state()?.graph.adjust_relationship(a, b, delta);
        if !applied {
            debug!(a, b, "graph: no edge to adjust");
        }
        self.lock_metrics()?.record_adjustment(applied);
        Ok(applied)
    }

    pub fn relationship_weight(&self, a: &str, b: &str) -> TaxonResult<Option<f64>> {
        Ok(self.read_state()?.graph.edge_weight(a, b))
    }

    /// Every graph edge, sorted by endpoint names.
    pub fn relationships(&self) -> TaxonResult<Vec<RelationshipEdge>> {
        Ok(self.read_state()?.graph.edges())
    }

    /// The label graph in Graphviz DOT.
    pub fn graph_dot(&self) -> TaxonResult<String> {
        Ok(self.read_state()?.graph.to_dot())
    }

    // --- Agent reliability ---

    /// Record one agent outcome; returns the agent's updated confidence.
    pub fn record_outcome(&self, agent_id: &str, success: bool) -> TaxonResult<f64> {
        let confidence = self.write_tracker()?.record_outcome(agent_id, success);
        self.lock_metrics()?.record_outcome();
        Ok(confidence)
    }

    /// Posterior mean for `agent_id`; 0.5 for agents never seen.
    pub fn confidence_of(&self, agent_id: &str) -> TaxonResult<f64> {
        Ok(self.read_tracker()?.confidence_of(agent_id))
    }

    /// `raw_confidence` scaled by the agent's reliability.
    pub fn weighted_confidence(&self, agent_id: &str, raw_confidence: f64) -> TaxonResult<f64> {
        Ok(self.read_tracker()?.weighted_confidence(agent_id, raw_confidence))
    }

    /// Confidence of every agent that has reported.
    pub fn agent_confidences(&self) -> TaxonResult<BTreeMap<String, f64>> {
        Ok(self.read_tracker()?.all_confidences())
    }

    pub fn reliability_score(&self, agent_id: &str) -> TaxonResult<ReliabilityScore> {
        Ok(self.read_tracker()?.score(agent_id))
    }

    // --- Metrics ---

    pub fn metrics(&self) -> TaxonResult<PipelineMetrics> {
        Ok(self.lock_metrics()?.clone())
    }

    pub fn reset_metrics(&self) -> TaxonResult<()> {
        self.lock_metrics()?.reset();
        Ok(())
    }

    // --- Locks ---

    pub(crate) fn read_state(&self) -> TaxonResult<RwLockReadGuard<'_, TaxonomyState>> {
        self.state
            .read()
            .map_err(|e| TaxonError::ConcurrencyError(format!("taxonomy lock: {e}")))
    }

    fn write_state(&self) -> TaxonResult<RwLockWriteGuard<'_, TaxonomyState>> {
        self.state
            .write()
            .map_err(|e| TaxonError::ConcurrencyError(format!("taxonomy lock: {e}")))
    }

    pub(crate) fn read_tracker(&self) -> TaxonResult<RwLockReadGuard<'_, ConfidenceTracker>> {
        self.tracker
            .read()
            .map_err(|e| TaxonError::ConcurrencyError(format!("tracker lock: {e}")))
    }

    fn write_tracker(&self) -> TaxonResult<RwLockWriteGuard<'_, ConfidenceTracker>> {
        self.tracker
            .write()
            .map_err(|e| TaxonError::ConcurrencyError(format!("tracker lock: {e}")))
    }

    fn lock_metrics(&self) -> TaxonResult<MutexGuard<'_, PipelineMetrics>> {
        self.metrics
            .lock()
            .map_err(|e| TaxonError::ConcurrencyError(format!("metrics lock: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = TaxonConfig::default();
        config.discovery.min_samples = 0;
        assert!(matches!(
            TaxonomyCoordinator::new(config),
            Err(TaxonError::ConfigError(_))
        ));
    }

    #[test]
    fn empty_batch_is_invalid_input() {
        let coordinator = TaxonomyCoordinator::new(TaxonConfig::default()).unwrap();
        let err = coordinator.ingest_batch(&IngestBatch::default()).unwrap_err();
        assert!(matches!(err, TaxonError::InvalidInput(InputError::EmptyBatch)));
        assert_eq!(coordinator.metrics().unwrap().batches_ingested, 0);
    }

    #[test]
    fn non_finite_delta_is_rejected() {
        let coordinator = TaxonomyCoordinator::new(TaxonConfig::default()).unwrap();
        assert!(coordinator.adjust_relationship("a", "b", Some(f64::NAN)).is_err());
    }

    #[test]
    fn coordinator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TaxonomyCoordinator>();
    }
}
