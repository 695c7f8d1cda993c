//! Pairwise cosine distance matrix. Rows are computed in parallel; the
//! result does not depend on scheduling.

use rayon::prelude::*;

use taxon_core::errors::{DiscoveryError, TaxonResult};
use taxon_core::models::DistanceMatrix;
use taxon_core::vector::cosine_distance;

/// Compute the full `n × n` cosine distance matrix.
///
/// The diagonal is exactly 0.0 and `d(i, j) == d(j, i)`.
pub fn cosine_distance_matrix<V: AsRef<[f32]> + Sync>(embeddings: &[V]) -> TaxonResult<DistanceMatrix> {
    let rows: Vec<Vec<f64>> = (0..embeddings.len())
        .into_par_iter()
        .map(|i| {
            let a = embeddings[i].as_ref();
            embeddings
                .iter()
                .enumerate()
                .map(|(j, b)| if i == j { 0.0 } else { cosine_distance(a, b.as_ref()) })
                .collect()
        })
        .collect();

    DistanceMatrix::from_rows(rows).ok_or_else(|| {
        DiscoveryError::ClusteringFailed {
            reason: "distance matrix is not square".to_string(),
        }
        .into()
    })
}
