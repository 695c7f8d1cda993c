use serde::{Deserialize, Serialize};

/// Outcome of one `ingest_batch` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub candidate_count: usize,
    pub promoted_count: usize,
    pub queued_count: usize,
    pub promoted_ids: Vec<String>,
    pub queued_ids: Vec<String>,
}

/// One nearest-label hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMatch {
    pub label_id: String,
    /// Cosine distance from the query to the label centroid.
    pub distance: f64,
}

/// Size of the taxonomy aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySummary {
    pub total_labels: usize,
    pub review_queue_size: usize,
    pub label_graph_nodes: usize,
    pub label_graph_edges: usize,
    /// Embedding dimensionality, fixed by the first accepted batch.
    pub dimensions: Option<usize>,
}
