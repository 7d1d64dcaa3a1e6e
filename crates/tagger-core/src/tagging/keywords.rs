//! Keyword expansion from fused labels.

use std::collections::HashSet;

use crate::taxonomy::Label;

/// Generic upper-level terms that never make useful keywords.
const SKIP_TERMS: &[&str] = &[
    "entity",
    "physical entity",
    "object",
    "whole",
    "thing",
    "structure",
    "artifact",
    "abstraction",
    "matter",
    "substance",
    "unit",
];

/// Expands labels into a deduplicated keyword list.
pub struct KeywordExpander {
    stopwords: HashSet<String>,
}

impl KeywordExpander {
    /// Built-in stoplist plus `extra` words (matched case-insensitively).
    pub fn new(extra: &[String]) -> Self {
        let stopwords = SKIP_TERMS
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().map(|s| s.to_lowercase()))
            .collect();
        Self { stopwords }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Keywords of every label, in label then keyword order.
    ///
    /// Each word appears once across all labels. Stopwords and a label's own
    /// name are left out of that label's keywords.
    pub fn expand<'a>(&self, labels: impl IntoIterator<Item = &'a Label>) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut keywords = Vec::new();
        for label in labels {
            for word in label.keywords() {
                if word == label.name() || self.is_stopword(word) || !seen.insert(word) {
                    continue;
                }
                keywords.push(word.to_string());
            }
        }
        keywords
    }
}
