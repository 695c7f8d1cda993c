//! # taxon-observability
//!
//! Subscriber setup, span macros, and the pipeline metrics collector.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::PipelineMetrics;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
