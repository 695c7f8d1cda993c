use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RECORD_CONFIDENCE;
use crate::errors::InputError;

/// One log record as the core sees it: the caller's index plus the
/// embedding produced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    /// Position of the record in the caller's batch.
    pub index: usize,
    /// Embedding vector. All records in a batch share one dimensionality.
    pub embedding: Vec<f32>,
}

impl EmbeddedRecord {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }
}

/// Input to one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestBatch {
    pub records: Vec<EmbeddedRecord>,
    /// Per-record confidence in `[0, 1]`. Missing entries default to 0.5.
    #[serde(default)]
    pub confidences: BTreeMap<usize, f64>,
    /// Optional per-record label suggestions.
    #[serde(default)]
    pub suggestions: Option<BTreeMap<usize, Vec<String>>>,
}

impl IngestBatch {
    /// Build a batch from embeddings, assigning indices by position.
    pub fn from_embeddings(embeddings: Vec<Vec<f32>>) -> Self {
        let records = embeddings
            .into_iter()
            .enumerate()
            .map(|(index, embedding)| EmbeddedRecord { index, embedding })
            .collect();
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn with_confidences(mut self, confidences: BTreeMap<usize, f64>) -> Self {
        self.confidences = confidences;
        self
    }

    pub fn with_suggestions(mut self, suggestions: BTreeMap<usize, Vec<String>>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Confidence for a record, falling back to the prior mean.
    pub fn confidence_of(&self, index: usize) -> f64 {
        self.confidences
            .get(&index)
            .copied()
            .unwrap_or(DEFAULT_RECORD_CONFIDENCE)
    }

    /// Suggestions for a record; empty when none were supplied.
    pub fn suggestions_for(&self, index: usize) -> &[String] {
        self.suggestions
            .as_ref()
            .and_then(|s| s.get(&index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check the batch and return its embedding dimensionality.
    pub fn validate(&self) -> Result<usize, InputError> {
        let first = self.records.first().ok_or(InputError::EmptyBatch)?;
        let dims = first.embedding.len();

        let mut seen = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.index) {
                return Err(InputError::DuplicateIndex {
                    index: record.index,
                });
            }
            if record.embedding.is_empty() {
                return Err(InputError::EmptyEmbedding {
                    index: record.index,
                });
            }
            if record.embedding.len() != dims {
                return Err(InputError::DimensionMismatch {
                    index: record.index,
                    expected: dims,
                    actual: record.embedding.len(),
                });
            }
            if record.embedding.iter().any(|v| !v.is_finite()) {
                return Err(InputError::NonFiniteEmbedding {
                    index: record.index,
                });
            }
        }

        for (&index, &value) in &self.confidences {
            if !seen.contains(&index) {
                return Err(InputError::UnknownIndex {
                    index,
                    map: "confidences".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(InputError::ConfidenceOutOfRange { index, value });
            }
        }

        if let Some(suggestions) = &self.suggestions {
            if let Some(&index) = suggestions.keys().find(|i| !seen.contains(i)) {
                return Err(InputError::UnknownIndex {
                    index,
                    map: "suggestions".to_string(),
                });
            }
        }

        Ok(dims)
    }
}
