//! PromotionEngine: gates each candidate, then either appends a label to the
//! taxonomy or parks the candidate in the review queue.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use taxon_core::config::PromotionConfig;
use taxon_core::errors::{InputError, TaxonError, TaxonResult};
use taxon_core::models::{LabelCandidate, LabelMatch, LabelRecord};

use crate::gates::{self, PromotionDecision};
use crate::naming;
use crate::review::ReviewEntry;
use crate::taxonomy::Taxonomy;

/// Result of one [`PromotionEngine::evaluate`] call, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationOutcome {
    pub promoted: Vec<LabelRecord>,
    pub queued: Vec<LabelCandidate>,
}

/// Owns the taxonomy and the review queue.
///
/// Invariant: an id is never in both. Promotion and approval remove the id
/// from the queue; nothing removes a label.
///
/// The first accepted batch fixes `dimensions`, whether its candidates are
/// promoted or queued. Every label and queue entry shares it.
#[derive(Debug)]
pub struct PromotionEngine {
    config: PromotionConfig,
    taxonomy: Taxonomy,
    review_queue: BTreeMap<String, ReviewEntry>,
    dimensions: Option<usize>,
}

impl PromotionEngine {
    pub fn new(config: PromotionConfig) -> Self {
        Self {
            config,
            taxonomy: Taxonomy::new(),
            review_queue: BTreeMap::new(),
            dimensions: None,
        }
    }

    /// Rebuild an engine from exported records and queue entries.
    ///
    /// `dimensions` is the exported lock, if any. Records and entries must
    /// all agree with it and with each other.
    pub fn from_parts(
        config: PromotionConfig,
        dimensions: Option<usize>,
        records: Vec<LabelRecord>,
        queue: Vec<ReviewEntry>,
    ) -> TaxonResult<Self> {
        let mut engine = Self::new(config);
        engine.dimensions = dimensions;
        for record in records {
            let id = record.id.clone();
            engine
                .fix_dimensions(0, record.dimensions())
                .map_err(|e| TaxonError::SnapshotError(format!("label {id}: {e}")))?;
            let inserted = engine
                .taxonomy
                .insert(record)
                .map_err(|e| TaxonError::SnapshotError(format!("label {id}: {e}")))?;
            if !inserted {
                return Err(TaxonError::SnapshotError(format!("duplicate label id {id}")));
            }
        }
        for entry in queue {
            if engine.taxonomy.contains(entry.id()) {
                return Err(TaxonError::SnapshotError(format!(
                    "candidate {} is both a label and queued for review",
                    entry.id()
                )));
            }
            engine
                .fix_dimensions(0, entry.candidate.centroid.len())
                .map_err(|e| TaxonError::SnapshotError(format!("candidate {}: {e}", entry.id())))?;
            engine.review_queue.insert(entry.id().to_string(), entry);
        }
        Ok(engine)
    }

    pub fn config(&self) -> &PromotionConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Pending candidates keyed by id.
    pub fn review_queue(&self) -> &BTreeMap<String, ReviewEntry> {
        &self.review_queue
    }

    pub fn review_entry(&self, id: &str) -> Option<&ReviewEntry> {
        self.review_queue.get(id)
    }

    pub fn label(&self, id: &str) -> Option<&LabelRecord> {
        self.taxonomy.get(id)
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> &[LabelRecord] {
        self.taxonomy.records()
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// Fail if a vector of `actual` dimensions can't enter this engine.
    pub fn check_dimensions(&self, index: usize, actual: usize) -> Result<(), InputError> {
        match self.dimensions {
            Some(expected) if expected != actual => Err(InputError::DimensionMismatch {
                index,
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Check `actual` and, if nothing is fixed yet, fix it.
    pub fn fix_dimensions(&mut self, index: usize, actual: usize) -> Result<(), InputError> {
        self.check_dimensions(index, actual)?;
        if self.dimensions.is_none() {
            debug!(dimensions = actual, "promotion: dimensionality fixed");
            self.dimensions = Some(actual);
        }
        Ok(())
    }

    /// Promote or queue each candidate.
    ///
    /// All candidates must share the engine's dimensionality (or, before
    /// one is fixed, the first candidate's); otherwise nothing is mutated.
    /// A candidate whose id is already a label is skipped with a warning.
    pub fn evaluate(&mut self, candidates: Vec<LabelCandidate>) -> TaxonResult<EvaluationOutcome> {
        self.check_candidate_dimensions(&candidates)?;
        if let Some(first) = candidates.first() {
            self.fix_dimensions(first.member_indices.first().copied().unwrap_or(0), first.centroid.len())?;
        }

        let mut outcome = EvaluationOutcome::default();
        for candidate in candidates {
            if self.taxonomy.contains(&candidate.id) {
                warn!(id = %candidate.id, "promotion: candidate id already a label, skipping");
                continue;
            }

            match gates::decide(&candidate, &self.config) {
                PromotionDecision::Promote => {
                    let name = naming::synthesize_name(&candidate);
                    let record = LabelRecord::from_candidate(&candidate, name, Utc::now());
                    self.taxonomy.insert(record.clone())?;
                    self.review_queue.remove(&candidate.id);
                    debug!(
                        id = %record.id,
                        name = %record.name,
                        size = candidate.size,
                        mean_confidence = candidate.mean_confidence,
                        "promotion: promoted"
                    );
                    outcome.promoted.push(record);
                }
                PromotionDecision::Review(reasons) => {
                    debug!(
                        id = %candidate.id,
                        size = candidate.size,
                        reasons = reasons.len(),
                        "promotion: queued for review"
                    );
                    self.review_queue.insert(
                        candidate.id.clone(),
                        ReviewEntry {
                            candidate: candidate.clone(),
                            reasons,
                            queued_at: Utc::now(),
                        },
                    );
                    outcome.queued.push(candidate);
                }
            }
        }

        info!(
            promoted = outcome.promoted.len(),
            queued = outcome.queued.len(),
            total_labels = self.taxonomy.len(),
            review_queue = self.review_queue.len(),
            "promotion: evaluation complete"
        );
        Ok(outcome)
    }

    /// Approve a queued candidate, optionally under a new name.
    ///
    /// Returns `Ok(None)` if `id` is not queued. Queued candidates always
    /// share the engine's dimensionality, so approval cannot mismatch.
    pub fn approve(&mut self, id: &str, override_name: Option<&str>) -> TaxonResult<Option<LabelRecord>> {
        let Some(entry) = self.review_queue.remove(id) else {
            debug!(id, "approval: not in review queue");
            return Ok(None);
        };
        let name = naming::resolve_name(&entry.candidate, override_name);
        let record = LabelRecord::from_candidate(&entry.candidate, name, Utc::now());
        if !self.taxonomy.insert(record.clone())? {
            warn!(id, "approval: id already a label, dropping queue entry");
            return Ok(None);
        }
        info!(id, name = %record.name, "approval: label created");
        Ok(Some(record))
    }

    /// Closest labels to `embedding`, ascending by cosine distance.
    pub fn nearest_labels(&self, embedding: &[f32], top_k: usize) -> TaxonResult<Vec<LabelMatch>> {
        self.taxonomy.nearest(embedding, top_k)
    }

    fn check_candidate_dimensions(&self, candidates: &[LabelCandidate]) -> Result<(), InputError> {
        let Some(expected) = self
            .dimensions
            .or_else(|| candidates.first().map(|c| c.centroid.len()))
        else {
            return Ok(());
        };
        for c in candidates {
            if c.centroid.len() != expected {
                return Err(InputError::DimensionMismatch {
                    index: c.member_indices.first().copied().unwrap_or(0),
                    expected,
                    actual: c.centroid.len(),
                });
            }
        }
        Ok(())
    }
}
