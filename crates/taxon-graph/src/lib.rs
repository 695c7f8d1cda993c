//! # taxon-graph
//!
//! Similarity graph over label centroids. Edges come only from a full
//! rebuild; manual adjustment reweights existing edges and never adds one.

pub mod export;
pub mod label_graph;
pub mod similarity;

pub use export::RelationshipEdge;
pub use label_graph::{LabelGraph, LabelNode, RelationWeight};
