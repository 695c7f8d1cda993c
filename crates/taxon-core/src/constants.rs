/// Taxon system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence assumed for a record the caller supplied no confidence for.
pub const DEFAULT_RECORD_CONFIDENCE: f64 = 0.5;

/// Prefix of names synthesized for candidates without label suggestions.
pub const SYNTHESIZED_LABEL_PREFIX: &str = "label_";

/// Number of id characters appended to [`SYNTHESIZED_LABEL_PREFIX`].
pub const SYNTHESIZED_ID_CHARS: usize = 8;

/// Upper bound of a relationship weight in the label graph.
pub const MAX_RELATIONSHIP_WEIGHT: f64 = 1.0;

/// Lower bound of a relationship weight in the label graph.
pub const MIN_RELATIONSHIP_WEIGHT: f64 = 0.0;

/// Snapshot format version written by `export_snapshot`.
pub const SNAPSHOT_VERSION: u32 = 1;
