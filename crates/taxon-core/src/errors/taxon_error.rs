use super::{DiscoveryError, InputError};

/// Top-level error for every fallible Taxon operation.
///
/// "Not found" and "no-op" outcomes are not errors: they surface as
/// `Ok(None)`, `Ok(vec![])`, or `Ok(false)` from the operation itself.
#[derive(Debug, thiserror::Error)]
pub enum TaxonError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("discovery error: {0}")]
    DiscoveryError(#[from] DiscoveryError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("snapshot error: {0}")]
    SnapshotError(String),
}

/// Result alias used throughout the workspace.
pub type TaxonResult<T> = Result<T, TaxonError>;
