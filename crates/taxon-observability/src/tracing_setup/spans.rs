//! Span definitions per pipeline operation: ingest, promotion, graph rebuild, approval.

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($records:expr) => {
        tracing::info_span!("taxon.ingest", records = $records)
    };
}

/// Create a promotion span.
#[macro_export]
macro_rules! promotion_span {
    ($candidates:expr) => {
        tracing::info_span!("taxon.promotion", candidates = $candidates)
    };
}

/// Create a graph rebuild span.
#[macro_export]
macro_rules! graph_rebuild_span {
    ($nodes:expr) => {
        tracing::info_span!("taxon.graph_rebuild", nodes = $nodes)
    };
}

/// Create an approval span.
#[macro_export]
macro_rules! approval_span {
    ($candidate_id:expr) => {
        tracing::info_span!("taxon.approval", candidate_id = %$candidate_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "taxon.ingest";
    pub const PROMOTION: &str = "taxon.promotion";
    pub const GRAPH_REBUILD: &str = "taxon.graph_rebuild";
    pub const APPROVAL: &str = "taxon.approval";
}
