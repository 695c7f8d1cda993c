//! DBSCAN over a precomputed distance matrix.
//!
//! A point is a core point when at least `min_samples` *other* points lie
//! within `eps` (inclusive). Clusters are the connected components of core
//! points plus the border points they reach. Seeds are visited in index
//! order, so a border point reachable from two clusters joins the one
//! seeded first.

use rayon::prelude::*;

use taxon_core::config::DiscoveryConfig;
use taxon_core::errors::TaxonResult;
use taxon_core::models::DistanceMatrix;
use taxon_core::traits::IClusterer;

/// Density clusterer with a fixed radius and core threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityClusterer {
    pub eps: f64,
    pub min_samples: usize,
}

impl DensityClusterer {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(config.eps, config.min_samples)
    }
}

impl IClusterer for DensityClusterer {
    fn cluster(&self, distances: &DistanceMatrix) -> TaxonResult<Vec<Option<usize>>> {
        let n = distances.len();
        let neighbors: Vec<Vec<usize>> = (0..n)
            .into_par_iter()
            .map(|i| distances.neighbors_within(i, self.eps))
            .collect();
        let is_core: Vec<bool> = neighbors
            .iter()
            .map(|nb| nb.len() >= self.min_samples)
            .collect();

        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut next_cluster = 0usize;

        for seed in 0..n {
            if labels[seed].is_some() || !is_core[seed] {
                continue;
            }
            let cluster = next_cluster;
            next_cluster += 1;

            labels[seed] = Some(cluster);
            let mut frontier = vec![seed];
            while let Some(p) = frontier.pop() {
                for &q in &neighbors[p] {
                    if labels[q].is_none() {
                        labels[q] = Some(cluster);
                        // Border points join but do not expand.
                        if is_core[q] {
                            frontier.push(q);
                        }
                    }
                }
            }
        }

        Ok(labels)
    }

    fn name(&self) -> &str {
        "dbscan"
    }
}
