//! Point-in-time export of a coordinator, and restore from one.
//!
//! A snapshot is a value; where it is stored is the caller's business.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use taxon_core::config::TaxonConfig;
use taxon_core::constants::SNAPSHOT_VERSION;
use taxon_core::errors::{TaxonError, TaxonResult};
use taxon_core::models::LabelRecord;
use taxon_core::traits::IClusterer;
use taxon_discovery::ClusterDiscovery;
use taxon_graph::{LabelGraph, RelationshipEdge};
use taxon_promotion::{PromotionEngine, ReviewEntry};
use taxon_reliability::{AgentReliability, ConfidenceTracker};

use crate::coordinator::TaxonomyCoordinator;
use crate::state::TaxonomyState;

/// Serializable state of one coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    /// Fixed embedding dimensionality, if any batch has been accepted.
    #[serde(default)]
    pub dimensions: Option<usize>,
    /// Labels in promotion order.
    pub records: Vec<LabelRecord>,
    pub review_queue: Vec<ReviewEntry>,
    pub relationships: Vec<RelationshipEdge>,
    pub reliability: BTreeMap<String, AgentReliability>,
}

impl TaxonomySnapshot {
    pub fn to_json(&self) -> TaxonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> TaxonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TaxonomyCoordinator {
    /// Capture labels, the review queue, graph weights, and agent state.
    pub fn export_snapshot(&self) -> TaxonResult<TaxonomySnapshot> {
        let state = self.read_state()?;
        let tracker = self.read_tracker()?;
        let snapshot = TaxonomySnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            dimensions: state.promotion().dimensions(),
            records: state.promotion().labels().to_vec(),
            review_queue: state.promotion().review_queue().values().cloned().collect(),
            relationships: state.graph().edges(),
            reliability: tracker.agents().clone(),
        };
        debug!(
            labels = snapshot.records.len(),
            queued = snapshot.review_queue.len(),
            edges = snapshot.relationships.len(),
            agents = snapshot.reliability.len(),
            "snapshot: exported"
        );
        Ok(snapshot)
    }

    /// Build a coordinator from a snapshot.
    ///
    /// Labels re-enter the graph in promotion order and relationships are
    /// rebuilt under `config`; snapshot weights are then reapplied to the
    /// edges that survived the rebuild. Discovery uses the density clusterer
    /// built from `config`; see [`restore_with_clusterer`](Self::restore_with_clusterer).
    pub fn restore(config: TaxonConfig, snapshot: TaxonomySnapshot) -> TaxonResult<Self> {
        let discovery = ClusterDiscovery::new(&config.discovery);
        Self::restore_into(config, discovery, snapshot)
    }

    /// Like [`restore`](Self::restore), with a custom clustering backend.
    pub fn restore_with_clusterer(
        config: TaxonConfig,
        clusterer: Box<dyn IClusterer>,
        snapshot: TaxonomySnapshot,
    ) -> TaxonResult<Self> {
        Self::restore_into(config, ClusterDiscovery::with_clusterer(clusterer), snapshot)
    }

    fn restore_into(
        config: TaxonConfig,
        discovery: ClusterDiscovery,
        snapshot: TaxonomySnapshot,
    ) -> TaxonResult<Self> {
        config.validate()?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(TaxonError::SnapshotError(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        for (agent, state) in &snapshot.reliability {
            let valid = |w: f64| w.is_finite() && w > 0.0;
            if !valid(state.success_weight) || !valid(state.failure_weight) {
                return Err(TaxonError::SnapshotError(format!(
                    "agent {agent} has non-positive pseudo-counts"
                )));
            }
        }

        let promotion = PromotionEngine::from_parts(
            config.promotion.clone(),
            snapshot.dimensions,
            snapshot.records,
            snapshot.review_queue,
        )?;

        let mut graph = LabelGraph::new(config.graph.clone());
        for record in promotion.labels() {
            graph.add_label(&record.name, record.centroid.clone());
        }
        graph.rebuild_relationships();
        let mut reapplied = 0usize;
        for edge in &snapshot.relationships {
            if graph.set_relationship_weight(&edge.a, &edge.b, edge.weight) {
                reapplied += 1;
            }
        }

        info!(
            labels = promotion.labels().len(),
            queued = promotion.review_queue().len(),
            edges = graph.edge_count(),
            reapplied,
            "snapshot: restored"
        );

        let state = TaxonomyState { promotion, graph };
        let tracker = ConfidenceTracker::from_agents(snapshot.reliability);
        Ok(Self::assemble(config, discovery, state, tracker))
    }
}
