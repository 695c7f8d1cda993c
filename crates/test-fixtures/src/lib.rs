//! Test fixtures for Taxon: deterministic embedding builders and golden
//! scenario files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use taxon_core::models::{EmbeddedRecord, IngestBatch};
use taxon_core::TaxonConfig;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

// --- Embedding builders ---

/// Unit vector along `axis`.
pub fn axis(dims: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    v[axis % dims] = 1.0;
    v
}

/// `base` plus deterministic noise in `[-scale, scale]` derived from `seed`.
pub fn jittered(base: &[f32], seed: &str, scale: f32) -> Vec<f32> {
    let hash = blake3::hash(seed.as_bytes());
    let bytes = hash.as_bytes();
    base.iter()
        .enumerate()
        .map(|(i, &x)| {
            let byte = bytes[i % 32];
            x + ((byte as f32 / 255.0) * 2.0 - 1.0) * scale
        })
        .collect()
}

/// `count` vectors scattered around `base`.
pub fn cluster_around(base: &[f32], count: usize, scale: f32, tag: &str) -> Vec<Vec<f32>> {
    (0..count)
        .map(|i| {
            if scale == 0.0 {
                base.to_vec()
            } else {
                jittered(base, &format!("{tag}-{i}"), scale)
            }
        })
        .collect()
}

/// Two vectors whose cosine similarity is `similarity`.
pub fn pair_with_similarity(dims: usize, similarity: f64) -> (Vec<f32>, Vec<f32>) {
    assert!(dims >= 2, "need at least two dimensions");
    let a = axis(dims, 0);
    let mut b = vec![0.0; dims];
    b[0] = similarity as f32;
    b[1] = (1.0 - similarity * similarity).max(0.0).sqrt() as f32;
    (a, b)
}

/// Fluent builder for [`IngestBatch`]; indices are assigned in insertion order.
#[derive(Debug, Default)]
pub struct BatchBuilder {
    batch: IngestBatch,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records with one confidence and one suggestion list each.
    pub fn group(mut self, embeddings: Vec<Vec<f32>>, confidence: Option<f64>, suggestions: &[&str]) -> Self {
        for embedding in embeddings {
            let index = self.batch.records.len();
            self.batch.records.push(EmbeddedRecord::new(index, embedding));
            if let Some(c) = confidence {
                self.batch.confidences.insert(index, c);
            }
            if !suggestions.is_empty() {
                self.batch
                    .suggestions
                    .get_or_insert_with(BTreeMap::new)
                    .insert(index, suggestions.iter().map(|s| s.to_string()).collect());
            }
        }
        self
    }

    pub fn build(self) -> IngestBatch {
        self.batch
    }
}

// --- Golden scenarios ---

/// One group of identical-direction records in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioGroup {
    pub count: usize,
    pub axis: usize,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub jitter: f32,
}

/// Expected pipeline outcome for a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioExpectation {
    pub candidates: usize,
    pub promoted: usize,
    pub queued: usize,
    /// Exact name of the single promoted label, when checked.
    #[serde(default)]
    pub promoted_name: Option<String>,
    /// Required prefix of the single promoted label's name.
    #[serde(default)]
    pub promoted_name_prefix: Option<String>,
    /// Name to approve the single queued candidate with.
    #[serde(default)]
    pub approve_as: Option<String>,
}

/// A golden pipeline scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub dims: usize,
    #[serde(default)]
    pub config: TaxonConfig,
    pub groups: Vec<ScenarioGroup>,
    pub expected: ScenarioExpectation,
}

impl Scenario {
    /// Build the scenario's input batch.
    pub fn batch(&self) -> IngestBatch {
        let mut builder = BatchBuilder::new();
        for (g, group) in self.groups.iter().enumerate() {
            let base = axis(self.dims, group.axis);
            let embeddings = cluster_around(&base, group.count, group.jitter, &format!("{}-{g}", self.name));
            let suggestions: Vec<&str> = group.suggestions.iter().map(String::as_str).collect();
            builder = builder.group(embeddings, group.confidence, &suggestions);
        }
        builder.build()
    }
}

/// Load `golden/<name>.json`.
pub fn load_scenario(name: &str) -> Scenario {
    load_fixture(&format!("golden/{name}.json"))
}

/// Names of every golden scenario shipped with this crate.
pub const GOLDEN_SCENARIOS: &[&str] = &[
    "single_cluster_promoted",
    "single_cluster_queued",
    "ambiguous_suggestions",
    "two_clusters_with_noise",
];
