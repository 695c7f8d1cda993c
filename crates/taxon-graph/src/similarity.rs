//! Pairwise centroid similarity for rebuilds.

use rayon::prelude::*;

use taxon_core::vector::cosine_similarity;

/// Every pair `(i, j)` with `i < j` whose cosine similarity is at least
/// `threshold`, in `(i, j)` order. Pairs of different dimensionality are
/// skipped.
pub fn similar_pairs<V: AsRef<[f32]> + Sync>(centroids: &[V], threshold: f64) -> Vec<(usize, usize, f64)> {
    (0..centroids.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = centroids[i].as_ref();
            ((i + 1)..centroids.len()).filter_map(move |j| {
                let b = centroids[j].as_ref();
                if a.len() != b.len() {
                    return None;
                }
                let sim = cosine_similarity(a, b);
                (sim >= threshold).then_some((i, j, sim))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_ordered_and_thresholded() {
        let centroids = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.1], vec![1.0, 0.0, 0.0]];
        let pairs = similar_pairs(&centroids, 0.6);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0, pairs[0].1), (0, 2));
    }

    #[test]
    fn threshold_is_inclusive() {
        let centroids = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        assert_eq!(similar_pairs(&centroids, 1.0).len(), 1);
    }
}
