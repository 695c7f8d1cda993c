//! Configuration: one TOML document with a section per subsystem.
//!
//! # Examples
//!
//! ```
//! use taxon_core::config::TaxonConfig;
//!
//! let config = TaxonConfig::from_toml("[discovery]\nmin_samples = 3\n").unwrap();
//! assert_eq!(config.discovery.min_samples, 3);
//! assert!((config.discovery.eps - 0.15).abs() < f64::EPSILON);
//! ```

pub mod defaults;
mod discovery_config;
mod graph_config;
mod observability_config;
mod promotion_config;

pub use discovery_config::DiscoveryConfig;
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use promotion_config::PromotionConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{TaxonError, TaxonResult};

/// Top-level configuration for a taxonomy instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaxonConfig {
    pub discovery: DiscoveryConfig,
    pub promotion: PromotionConfig,
    pub graph: GraphConfig,
    pub observability: ObservabilityConfig,
}

impl TaxonConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(source: &str) -> TaxonResult<Self> {
        toml::from_str(source).map_err(|e| TaxonError::ConfigError(e.to_string()))
    }

    /// Render this config as TOML.
    pub fn to_toml(&self) -> TaxonResult<String> {
        toml::to_string(self).map_err(|e| TaxonError::ConfigError(e.to_string()))
    }

    /// Reject parameter combinations the engines cannot honor.
    pub fn validate(&self) -> TaxonResult<()> {
        let d = &self.discovery;
        if !(d.eps > 0.0 && d.eps <= 2.0) {
            return Err(invalid(format!("discovery.eps must be in (0, 2], got {}", d.eps)));
        }
        if d.min_samples == 0 {
            return Err(invalid("discovery.min_samples must be at least 1".to_string()));
        }

        let p = &self.promotion;
        if p.promotion_min_size == 0 {
            return Err(invalid("promotion.promotion_min_size must be at least 1".to_string()));
        }
        check_unit("promotion.promotion_min_confidence", p.promotion_min_confidence)?;
        check_unit("promotion.review_max_label_entropy", p.review_max_label_entropy)?;
        if p.nearest_top_k == 0 {
            return Err(invalid("promotion.nearest_top_k must be at least 1".to_string()));
        }

        let g = &self.graph;
        if !(-1.0..=1.0).contains(&g.similarity_threshold) {
            return Err(invalid(format!(
                "graph.similarity_threshold must be in [-1, 1], got {}",
                g.similarity_threshold
            )));
        }
        if !g.default_adjustment.is_finite() {
            return Err(invalid("graph.default_adjustment must be finite".to_string()));
        }
        if g.related_top_k == 0 {
            return Err(invalid("graph.related_top_k must be at least 1".to_string()));
        }

        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> TaxonResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in [0, 1], got {value}")))
    }
}

fn invalid(message: String) -> TaxonError {
    TaxonError::ConfigError(message)
}
