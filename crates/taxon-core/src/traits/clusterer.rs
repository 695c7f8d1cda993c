use crate::errors::TaxonResult;
use crate::models::DistanceMatrix;

/// Density clustering over a precomputed distance matrix.
pub trait IClusterer: Send + Sync {
    /// Assign each point a cluster number, or `None` for noise.
    ///
    /// The returned vector is parallel to the matrix rows. Cluster numbers
    /// are dense from 0 and must be a deterministic function of the input.
    fn cluster(&self, distances: &DistanceMatrix) -> TaxonResult<Vec<Option<usize>>>;

    /// Human-readable clusterer name.
    fn name(&self) -> &str;
}
