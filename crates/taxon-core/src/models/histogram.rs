use serde::{Deserialize, Serialize};

/// Count of each suggested label across a candidate's members,
/// kept in first-seen order so ties resolve deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionHistogram(Vec<(String, u64)>);

impl SuggestionHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        match self.0.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.0.push((label.to_string(), 1)),
        }
    }

    /// Count every label in `labels`, one occurrence each.
    pub fn add_all<S: AsRef<str>>(&mut self, labels: &[S]) {
        for label in labels {
            self.add(label.as_ref());
        }
    }

    pub fn count(&self, label: &str) -> u64 {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Total suggestion weight.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct labels.
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// The most frequent label; the earliest-seen one wins a tie.
    pub fn most_frequent(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (label, count) in self.entries() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SuggestionHistogram {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for label in iter {
            histogram.add(label.as_ref());
        }
        histogram
    }
}
