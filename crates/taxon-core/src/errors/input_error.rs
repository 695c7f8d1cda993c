/// Caller-supplied input that cannot be processed as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("batch contains no records")]
    EmptyBatch,

    #[error("record {index} has a zero-length embedding")]
    EmptyEmbedding { index: usize },

    /// `index` is the offending record; 0 for a query vector.
    #[error("record {index}: dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("record {index} has a non-finite embedding component")]
    NonFiniteEmbedding { index: usize },

    #[error("record index {index} appears more than once in the batch")]
    DuplicateIndex { index: usize },

    #[error("{map} entry references index {index}, which is not in the batch")]
    UnknownIndex { index: usize, map: String },

    #[error("record {index}: confidence {value} is outside [0, 1]")]
    ConfidenceOutOfRange { index: usize, value: f64 },

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}
