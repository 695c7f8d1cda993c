//! Append-only store of promoted labels.
//!
//! Records keep insertion order, which breaks ties in nearest-label search.
//! The first record fixes the embedding dimensionality.

use std::collections::HashMap;

use taxon_core::errors::{InputError, TaxonResult};
use taxon_core::models::{LabelMatch, LabelRecord};
use taxon_core::vector::cosine_distance;

#[derive(Debug, Default)]
pub struct Taxonomy {
    records: Vec<LabelRecord>,
    by_id: HashMap<String, usize>,
    dimensions: Option<usize>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&LabelRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    /// Fail if a vector of `actual` dimensions can't live in this taxonomy.
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

    /// Append a record. Returns `Ok(false)` if the id is already present.
    pub fn insert(&mut self, record: LabelRecord) -> Result<bool, InputError> {
        self.check_dimensions(record.members.first().copied().unwrap_or(0), record.dimensions())?;
        if self.by_id.contains_key(&record.id) {
            return Ok(false);
        }
        if self.dimensions.is_none() {
            self.dimensions = Some(record.dimensions());
        }
        self.by_id.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(true)
    }

    /// The `top_k` centroids closest to `query`, ascending by cosine
    /// distance. Equal distances keep insertion order.
    pub fn nearest(&self, query: &[f32], top_k: usize) -> TaxonResult<Vec<LabelMatch>> {
        if self.records.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        self.check_dimensions(0, query.len())?;
        if query.iter().any(|x| !x.is_finite()) {
            return Err(InputError::InvalidQuery {
                reason: "query embedding has a non-finite component".to_string(),
            }
            .into());
        }

        let mut matches: Vec<LabelMatch> = self
            .records
            .iter()
            .map(|r| LabelMatch {
                label_id: r.id.clone(),
                distance: cosine_distance(query, &r.centroid),
            })
            .collect();
        // Stable: ties stay in insertion order.
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(top_k);
        Ok(matches)
    }
}
