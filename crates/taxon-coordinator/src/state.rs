use taxon_core::config::TaxonConfig;
use taxon_core::models::{LabelRecord, TaxonomySummary};
use taxon_graph::LabelGraph;
use taxon_promotion::PromotionEngine;

/// The taxonomy aggregate: promoted labels, the review queue, and the
/// graph over them. Mutated only under the coordinator's write lock.
#[derive(Debug)]
pub struct TaxonomyState {
    pub(crate) promotion: PromotionEngine,
    pub(crate) graph: LabelGraph,
}

impl TaxonomyState {
    pub fn new(config: &TaxonConfig) -> Self {
        Self {
            promotion: PromotionEngine::new(config.promotion.clone()),
            graph: LabelGraph::new(config.graph.clone()),
        }
    }

    pub fn promotion(&self) -> &PromotionEngine {
        &self.promotion
    }

    pub fn graph(&self) -> &LabelGraph {
        &self.graph
    }

    /// Add each record to the graph, then rebuild once.
    /// Returns `false` (and skips the rebuild) when `records` is empty.
    pub(crate) fn connect(&mut self, records: &[LabelRecord]) -> bool {
        if records.is_empty() {
            return false;
        }
        for record in records {
            self.graph.add_label(&record.name, record.centroid.clone());
        }
        let span = taxon_observability::graph_rebuild_span!(self.graph.node_count());
        let _guard = span.enter();
        self.graph.rebuild_relationships();
        true
    }

    pub fn summary(&self) -> TaxonomySummary {
        TaxonomySummary {
            total_labels: self.promotion.labels().len(),
            review_queue_size: self.promotion.review_queue().len(),
            label_graph_nodes: self.graph.node_count(),
            label_graph_edges: self.graph.edge_count(),
            dimensions: self.promotion.dimensions(),
        }
    }
}
