//! Label name synthesis.

use taxon_core::constants::{SYNTHESIZED_ID_CHARS, SYNTHESIZED_LABEL_PREFIX};
use taxon_core::models::LabelCandidate;

/// Most frequent suggestion (first seen wins a tie), else a name derived
/// from the candidate id. Never empty.
pub fn synthesize_name(candidate: &LabelCandidate) -> String {
    if let Some(name) = candidate.label_suggestions.most_frequent() {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }
    let prefix: String = candidate
        .id
        .chars()
        .filter(|c| *c != '-')
        .take(SYNTHESIZED_ID_CHARS)
        .collect();
    format!("{SYNTHESIZED_LABEL_PREFIX}{prefix}")
}

/// The override, verbatim, if it has any non-whitespace content; else
/// [`synthesize_name`].
pub fn resolve_name(candidate: &LabelCandidate, override_name: Option<&str>) -> String {
    match override_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => synthesize_name(candidate),
    }
}
