//! # taxon-discovery
//!
//! Batch → cosine distance matrix → density clustering → label candidates.
//! Noise points are dropped and never retried.

pub mod candidates;
pub mod dbscan;
pub mod distance;
pub mod engine;

pub use dbscan::DensityClusterer;
pub use engine::ClusterDiscovery;
