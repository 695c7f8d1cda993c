// Single source of truth for all default values.

// --- Discovery ---
pub const DEFAULT_EPS: f64 = 0.15;
pub const DEFAULT_MIN_SAMPLES: usize = 5;

// --- Promotion ---
pub const DEFAULT_PROMOTION_MIN_SIZE: usize = 10;
pub const DEFAULT_PROMOTION_MIN_CONFIDENCE: f64 = 0.65;
pub const DEFAULT_REVIEW_MAX_LABEL_ENTROPY: f64 = 0.8;
pub const DEFAULT_NEAREST_TOP_K: usize = 3;

// --- Graph ---
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_RELATIONSHIP_ADJUSTMENT: f64 = 0.05;
pub const DEFAULT_RELATED_TOP_K: usize = 3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
pub const DEFAULT_LOG_ENV_VAR: &str = "TAXON_LOG";
