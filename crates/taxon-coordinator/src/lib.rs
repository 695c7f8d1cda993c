//! # taxon-coordinator
//!
//! Composes discovery, promotion, the label graph, and the reliability
//! tracker behind one [`TaxonomyCoordinator`]. Writes take an exclusive lock
//! on the taxonomy aggregate; queries share it.

pub mod coordinator;
pub mod snapshot;
pub mod state;

pub use coordinator::TaxonomyCoordinator;
pub use snapshot::TaxonomySnapshot;
pub use state::TaxonomyState;

// Re-exported so callers need only this crate.
pub use taxon_core::{IngestBatch, IngestReport, LabelMatch, LabelRecord, TaxonConfig, TaxonError, TaxonResult, TaxonomySummary};
pub use taxon_graph::RelationshipEdge;
pub use taxon_observability::PipelineMetrics;
pub use taxon_promotion::{ReviewEntry, ReviewReason};
pub use taxon_reliability::{ReliabilityScore, ReliabilityTier};
