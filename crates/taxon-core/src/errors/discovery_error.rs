/// Cluster discovery errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("clustering failed: {reason}")]
    ClusteringFailed { reason: String },
}
