//! LabelGraph: petgraph `StableUnGraph` plus a name → node index.

use std::collections::HashMap;
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use taxon_core::config::GraphConfig;
use taxon_core::constants::{MAX_RELATIONSHIP_WEIGHT, MIN_RELATIONSHIP_WEIGHT};

use crate::similarity::similar_pairs;

/// A label in the graph, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub name: String,
    pub centroid: Vec<f32>,
}

impl fmt::Display for LabelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Edge payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationWeight {
    /// Centroid similarity at the last rebuild.
    pub similarity: f64,
    /// Current weight in `[0, 1]`, including manual adjustments.
    pub weight: f64,
}

impl fmt::Display for RelationWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.weight)
    }
}

fn clamp_weight(weight: f64) -> f64 {
    weight.clamp(MIN_RELATIONSHIP_WEIGHT, MAX_RELATIONSHIP_WEIGHT)
}

/// Undirected similarity graph over label centroids.
#[derive(Debug)]
pub struct LabelGraph {
    pub(crate) graph: StableUnGraph<LabelNode, RelationWeight>,
    pub(crate) node_index: HashMap<String, NodeIndex>,
    config: GraphConfig,
}

impl LabelGraph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            graph: StableUnGraph::default(),
            node_index: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn centroid(&self, name: &str) -> Option<&[f32]> {
        let idx = self.node_index.get(name)?;
        self.graph.node_weight(*idx).map(|n| n.centroid.as_slice())
    }

    /// Insert a node, or replace the centroid of an existing one.
    /// Edges are untouched. Returns `true` if the node is new.
    pub fn add_label(&mut self, name: &str, centroid: Vec<f32>) -> bool {
        if let Some(&idx) = self.node_index.get(name) {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.centroid = centroid;
            }
            debug!(name, "graph: centroid replaced");
            return false;
        }
        let idx = self.graph.add_node(LabelNode {
            name: name.to_string(),
            centroid,
        });
        self.node_index.insert(name.to_string(), idx);
        true
    }

    /// Drop every edge, then connect each pair whose centroid similarity
    /// meets the threshold. Manual adjustments are discarded.
    ///
    /// Returns the new edge count.
    pub fn rebuild_relationships(&mut self) -> usize {
        self.graph.clear_edges();

        // Name order keeps edge insertion independent of node history.
        let mut nodes: Vec<(&str, NodeIndex)> = self
            .node_index
            .iter()
            .map(|(name, idx)| (name.as_str(), *idx))
            .collect();
        nodes.sort_unstable_by(|a, b| a.0.cmp(b.0));
        let indices: Vec<NodeIndex> = nodes.iter().map(|(_, idx)| *idx).collect();

        let centroids: Vec<&[f32]> = indices
            .iter()
            .filter_map(|idx| self.graph.node_weight(*idx).map(|n| n.centroid.as_slice()))
            .collect();
        let pairs = similar_pairs(&centroids, self.config.similarity_threshold);

        for (i, j, similarity) in pairs {
            let weight = clamp_weight(similarity);
            self.graph
                .add_edge(indices[i], indices[j], RelationWeight { similarity, weight });
        }

        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            threshold = self.config.similarity_threshold,
            "graph: relationships rebuilt"
        );
        self.graph.edge_count()
    }

    /// Neighbors of `name`, descending by weight (ties by name), at most
    /// `top_k`. Unknown names yield an empty list.
    pub fn related_labels(&self, name: &str, top_k: usize) -> Vec<(String, f64)> {
        let Some(&idx) = self.node_index.get(name) else {
            return Vec::new();
        };
        let mut related: Vec<(String, f64)> = self
            .graph
            .edges(idx)
            .filter_map(|edge| {
                let other = if edge.source() == idx { edge.target() } else { edge.source() };
                self.graph
                    .node_weight(other)
                    .map(|n| (n.name.clone(), edge.weight().weight))
            })
            .collect();
        related.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        related.truncate(top_k);
        related
    }

    /// Current weight of the edge between `a` and `b`.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (ia, ib) = (self.node_index.get(a)?, self.node_index.get(b)?);
        let edge = self.graph.find_edge(*ia, *ib)?;
        self.graph.edge_weight(edge).map(|w| w.weight)
    }

    /// Add `delta` to an existing edge, clamping to `[0, 1]`.
    /// Returns `false` without mutating anything when there is no edge.
    pub fn adjust_relationship(&mut self, a: &str, b: &str, delta: f64) -> bool {
        self.update_weight(a, b, |w| w + delta)
    }

    /// Overwrite the weight of an existing edge, clamping to `[0, 1]`.
    /// Returns `false` when there is no edge.
    pub fn set_relationship_weight(&mut self, a: &str, b: &str, weight: f64) -> bool {
        self.update_weight(a, b, |_| weight)
    }

    fn update_weight(&mut self, a: &str, b: &str, f: impl FnOnce(f64) -> f64) -> bool {
        let (Some(&ia), Some(&ib)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return false;
        };
        let Some(edge) = self.graph.find_edge(ia, ib) else {
            return false;
        };
        match self.graph.edge_weight_mut(edge) {
            Some(w) => {
                let before = w.weight;
                w.weight = clamp_weight(f(before));
                debug!(a, b, before, after = w.weight, "graph: relationship reweighted");
                true
            }
            None => false,
        }
    }
}
