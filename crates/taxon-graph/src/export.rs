//! Edge-list and Graphviz export.

use petgraph::dot::Dot;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::label_graph::LabelGraph;

/// One undirected edge, endpoints in name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

impl LabelGraph {
    /// Every edge, sorted by `(a, b)`.
    pub fn edges(&self) -> Vec<RelationshipEdge> {
        let mut edges: Vec<RelationshipEdge> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.graph.node_weight(edge.source())?;
                let target = self.graph.node_weight(edge.target())?;
                let (a, b) = if source.name <= target.name {
                    (source.name.clone(), target.name.clone())
                } else {
                    (target.name.clone(), source.name.clone())
                };
                Some(RelationshipEdge {
                    a,
                    b,
                    weight: edge.weight().weight,
                })
            })
            .collect();
        edges.sort_by(|x, y| x.a.cmp(&y.a).then_with(|| x.b.cmp(&y.b)));
        edges
    }

    /// Graphviz DOT rendering: nodes labelled by name, edges by weight.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}
