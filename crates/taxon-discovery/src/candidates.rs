//! Turn cluster assignments into label candidates.

use std::collections::BTreeMap;

use uuid::Uuid;

use taxon_core::models::{IngestBatch, LabelCandidate, SuggestionHistogram};
use taxon_core::vector::centroid;

/// Group batch positions by cluster number, dropping noise.
///
/// Clusters come back in cluster-number order; positions within each
/// cluster are ascending.
pub fn group_by_cluster(labels: &[Option<usize>]) -> Vec<Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (pos, label) in labels.iter().enumerate() {
        if let Some(cluster) = label {
            groups.entry(*cluster).or_default().push(pos);
        }
    }
    groups.into_values().collect()
}

/// Build one candidate from the batch positions of its members.
pub fn build_candidate(batch: &IngestBatch, positions: &[usize]) -> LabelCandidate {
    let mut members: Vec<(usize, &[f32])> = positions
        .iter()
        .map(|&p| {
            let record = &batch.records[p];
            (record.index, record.embedding.as_slice())
        })
        .collect();
    members.sort_by_key(|(index, _)| *index);

    let member_indices: Vec<usize> = members.iter().map(|(i, _)| *i).collect();
    let embeddings: Vec<&[f32]> = members.iter().map(|(_, e)| *e).collect();

    let mean_confidence = if member_indices.is_empty() {
        taxon_core::constants::DEFAULT_RECORD_CONFIDENCE
    } else {
        member_indices
            .iter()
            .map(|&i| batch.confidence_of(i))
            .sum::<f64>()
            / member_indices.len() as f64
    };

    // A member with k suggestions contributes k to the histogram.
    let mut label_suggestions = SuggestionHistogram::new();
    for &i in &member_indices {
        label_suggestions.add_all(batch.suggestions_for(i));
    }

    LabelCandidate {
        id: Uuid::new_v4().to_string(),
        size: member_indices.len(),
        centroid: centroid(&embeddings),
        member_indices,
        mean_confidence,
        label_suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::models::EmbeddedRecord;

    #[test]
    fn noise_is_dropped_and_groups_are_ordered() {
        let groups = group_by_cluster(&[Some(1), None, Some(0), Some(1), None]);
        assert_eq!(groups, vec![vec![2], vec![0, 3]]);
    }

    #[test]
    fn candidate_members_are_sorted_by_caller_index() {
        let batch = IngestBatch {
            records: vec![
                EmbeddedRecord::new(30, vec![1.0, 0.0]),
                EmbeddedRecord::new(10, vec![3.0, 2.0]),
            ],
            ..IngestBatch::default()
        };
        let c = build_candidate(&batch, &[0, 1]);
        assert_eq!(c.member_indices, vec![10, 30]);
        assert_eq!(c.size, 2);
        assert_eq!(c.centroid, vec![2.0, 1.0]);
        assert_eq!(c.mean_confidence, 0.5);
        assert!(c.label_suggestions.is_empty());
    }

    #[test]
    fn each_suggestion_counts_once_per_occurrence() {
        let batch = IngestBatch::from_embeddings(vec![vec![1.0], vec![1.0]])
            .with_confidences(BTreeMap::from([(0, 0.9), (1, 0.7)]))
            .with_suggestions(BTreeMap::from([
                (0, vec!["disk".to_string(), "io".to_string()]),
                (1, vec!["disk".to_string()]),
            ]));
        let c = build_candidate(&batch, &[0, 1]);
        assert_eq!(c.label_suggestions.count("disk"), 2);
        assert_eq!(c.label_suggestions.count("io"), 1);
        assert_eq!(c.label_suggestions.total(), 3);
        assert!((c.mean_confidence - 0.8).abs() < 1e-12);
    }
}
