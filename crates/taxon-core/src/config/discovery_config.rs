use serde::{Deserialize, Serialize};

use super::defaults;

/// Cluster discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Neighborhood radius, in cosine distance.
    pub eps: f64,
    /// Number of other points within `eps` that makes a point a core point.
    pub min_samples: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            eps: defaults::DEFAULT_EPS,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
        }
    }
}
