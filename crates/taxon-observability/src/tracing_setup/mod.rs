//! Tracing setup: structured logging with span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

use taxon_core::config::ObservabilityConfig;
use taxon_core::errors::{TaxonError, TaxonResult};

/// Install the global subscriber.
///
/// The filter comes from the configured env var (default `TAXON_LOG`),
/// falling back to `log_level`. Output is JSON when `json_logs` is set.
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> TaxonResult<()> {
    let filter = EnvFilter::try_from_env(&config.log_env_var)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TaxonError::ConfigError(format!("invalid log filter: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TaxonError::ConfigError(format!("tracing already initialized: {e}")))
}

/// Install a plain subscriber with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) -> TaxonResult<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| TaxonError::ConfigError(format!("invalid log filter: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| TaxonError::ConfigError(format!("tracing already initialized: {e}")))
}
