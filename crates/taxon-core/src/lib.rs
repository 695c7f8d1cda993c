//! # taxon-core
//!
//! Foundation crate for the Taxon label discovery engine.
//! Defines the shared models, errors, config, constants, vector math,
//! and the clustering seam. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod vector;

// Re-export the most commonly used types at the crate root.
pub use config::TaxonConfig;
pub use errors::{TaxonError, TaxonResult};
pub use models::{
    DistanceMatrix, EmbeddedRecord, IngestBatch, IngestReport, LabelCandidate, LabelMatch,
    LabelMetadata, LabelRecord, SuggestionHistogram, TaxonomySummary,
};
