//! ClusterDiscovery: validate → distance matrix → cluster → candidates.

use tracing::{debug, info};

use taxon_core::config::DiscoveryConfig;
use taxon_core::errors::{DiscoveryError, TaxonResult};
use taxon_core::models::{IngestBatch, LabelCandidate};
use taxon_core::traits::IClusterer;

use crate::candidates;
use crate::dbscan::DensityClusterer;
use crate::distance::cosine_distance_matrix;

/// Groups a batch of embedded records into label candidates.
pub struct ClusterDiscovery {
    clusterer: Box<dyn IClusterer>,
}

impl ClusterDiscovery {
    /// Discovery backed by [`DensityClusterer`].
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            clusterer: Box::new(DensityClusterer::from_config(config)),
        }
    }

    /// Discovery backed by a custom clusterer.
    pub fn with_clusterer(clusterer: Box<dyn IClusterer>) -> Self {
        Self { clusterer }
    }

    pub fn clusterer_name(&self) -> &str {
        self.clusterer.name()
    }

    /// Discover candidates in a batch.
    ///
    /// An empty batch yields no candidates. A non-empty batch must pass
    /// [`IngestBatch::validate`]. Noise points produce nothing.
    pub fn discover(&self, batch: &IngestBatch) -> TaxonResult<Vec<LabelCandidate>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let dims = batch.validate()?;

        let embeddings: Vec<&[f32]> = batch.records.iter().map(|r| r.embedding.as_slice()).collect();
        let distances = cosine_distance_matrix(&embeddings)?;

        let labels = self.clusterer.cluster(&distances)?;
        if labels.len() != batch.len() {
            return Err(DiscoveryError::ClusteringFailed {
                reason: format!(
                    "{} returned {} labels for {} points",
                    self.clusterer.name(),
                    labels.len(),
                    batch.len()
                ),
            }
            .into());
        }

        let groups = candidates::group_by_cluster(&labels);
        let noise = labels.iter().filter(|l| l.is_none()).count();
        info!(
            records = batch.len(),
            dims,
            clusters = groups.len(),
            noise,
            clusterer = self.clusterer.name(),
            "discovery: clustering complete"
        );

        let found: Vec<LabelCandidate> = groups
            .iter()
            .map(|positions| candidates::build_candidate(batch, positions))
            .collect();
        for c in &found {
            debug!(
                id = %c.id,
                size = c.size,
                mean_confidence = c.mean_confidence,
                distinct_suggestions = c.label_suggestions.distinct(),
                "discovery: candidate built"
            );
        }
        Ok(found)
    }
}
