//! Data model shared across the workspace.

mod candidate;
mod distance;
mod embedding;
mod histogram;
mod record;
mod report;

pub use candidate::LabelCandidate;
pub use distance::DistanceMatrix;
pub use embedding::{EmbeddedRecord, IngestBatch};
pub use histogram::SuggestionHistogram;
pub use record::{LabelMetadata, LabelRecord};
pub use report::{IngestReport, LabelMatch, TaxonomySummary};
