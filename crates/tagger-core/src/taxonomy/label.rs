//! Hierarchical labels and their path algebra.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

/// A node in a label taxonomy, identified by its root-to-leaf class path.
///
/// For example `("animal", "mammal", "tiger")`. Two labels are equal when
/// their class paths are equal; alternate names, related words and dataset
/// membership do not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alt: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related: Vec<String>,
    #[serde(skip)]
    dataset: Option<Arc<str>>,
    #[serde(skip)]
    class_index: Option<usize>,
}

impl Label {
    /// Create an unregistered label from its class path.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            alt: vec![],
            related: vec![],
            dataset: None,
            class_index: None,
        }
    }

    /// Set alternate names for the label.
    pub fn with_alt<I, S>(mut self, alt: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt = dedup(alt.into_iter().map(Into::into));
        self
    }

    /// Set related keywords for the label.
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = dedup(related.into_iter().map(Into::into));
        self
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn alt(&self) -> &[String] {
        &self.alt
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    /// Name of the owning dataset, once registered.
    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    /// Position in the owning dataset, once registered.
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// The last class in the path; the label's proper name.
    pub fn name(&self) -> &str {
        self.classes.last().map(String::as_str).unwrap_or("")
    }

    /// Number of levels in the path. Deeper labels are more specific.
    pub fn depth(&self) -> usize {
        self.classes.len()
    }

    /// Classes, then alternate names, then related words.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .chain(&self.alt)
            .chain(&self.related)
            .map(String::as_str)
    }

    /// Stable string key, `"{name}-{class_index}-{dataset}"`, lowercased with
    /// spaces replaced by dashes. Unregistered labels use `-1` and an empty
    /// dataset name.
    pub fn canonical_key(&self) -> String {
        let slug = |s: &str| s.to_lowercase().replace(' ', "-");
        let index = self
            .class_index
            .map_or_else(|| "-1".to_string(), |i| i.to_string());
        format!(
            "{}-{}-{}",
            slug(self.name()),
            index,
            slug(self.dataset().unwrap_or(""))
        )
    }

    /// Longest shared prefix of the two class paths.
    ///
    /// `("animal", "mammal", "tiger")` and `("animal", "mammal", "lion")`
    /// share `("animal", "mammal")`. Comparison stops at the first mismatch.
    pub fn common(&self, other: &Label) -> &[String] {
        let shared = self
            .classes
            .iter()
            .zip(&other.classes)
            .take_while(|(a, b)| a == b)
            .count();
        &self.classes[..shared]
    }

    /// True when this label's path is a prefix of (or equal to) `other`'s.
    ///
    /// A label is its own parent.
    pub fn is_parent(&self, other: &Label) -> bool {
        self.common(other).len() == self.classes.len()
    }

    /// True when any of this label's related words appears in `other`'s path.
    pub fn is_related(&self, other: &Label) -> bool {
        self.related.iter().any(|word| other.classes.contains(word))
    }

    /// Positional set-union of classes, alternate names and related words.
    ///
    /// Values are interleaved index by index, this label's first, skipping
    /// anything already taken. Dataset membership is kept from `self`.
    pub fn union(&self, other: &Label) -> Label {
        Label {
            classes: positional_union(&self.classes, &other.classes),
            alt: positional_union(&self.alt, &other.alt),
            related: positional_union(&self.related, &other.related),
            dataset: self.dataset.clone(),
            class_index: self.class_index,
        }
    }

    /// Values of this label present in `other`, field by field.
    pub fn intersection(&self, other: &Label) -> Label {
        Label {
            classes: intersect(&self.classes, &other.classes),
            alt: intersect(&self.alt, &other.alt),
            related: intersect(&self.related, &other.related),
            dataset: self.dataset.clone(),
            class_index: self.class_index,
        }
    }

    /// Bind the label to a dataset. Only the dataset builder calls this.
    pub(super) fn bind(&mut self, dataset: Arc<str>, class_index: usize) {
        self.dataset = Some(dataset);
        self.class_index = Some(class_index);
    }

    pub(super) fn add_related(&mut self, word: &str) {
        if !self.related.iter().any(|w| w == word) {
            self.related.push(word.to_string());
        }
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.classes == other.classes
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.classes.hash(state);
    }
}

fn positional_union(a: &[String], b: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(a.len() + b.len());
    for i in 0..a.len().max(b.len()) {
        for value in [a.get(i), b.get(i)].into_iter().flatten() {
            if !merged.contains(value) {
                merged.push(value.clone());
            }
        }
    }
    merged
}

fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    dedup(a.iter().filter(|v| b.contains(v)).cloned())
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiger() -> Label {
        Label::new(["animal", "mammal", "tiger"])
    }

    fn lion() -> Label {
        Label::new(["animal", "mammal", "lion"])
    }

    fn mammal() -> Label {
        Label::new(["animal", "mammal"])
    }

    #[test]
    fn test_equality_ignores_metadata() {
        let a = tiger().with_alt(["tigress"]);
        let b = tiger().with_related(["cat"]);
        assert_eq!(a, b);
        assert_ne!(tiger(), lion());
    }

    #[test]
    fn test_name_and_depth() {
        assert_eq!(tiger().name(), "tiger");
        assert_eq!(tiger().depth(), 3);
        assert_eq!(Label::new(Vec::<String>::new()).name(), "");
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(tiger().common(&lion()), &["animal", "mammal"]);
        assert_eq!(tiger().common(&tiger()), tiger().classes());
        let plant = Label::new(["plant", "mammal"]);
        // Stops at the first mismatch even if later levels agree
        assert!(tiger().common(&plant).is_empty());
    }

    #[test]
    fn test_is_parent() {
        assert!(mammal().is_parent(&tiger()));
        assert!(!tiger().is_parent(&mammal()));
        assert!(!lion().is_parent(&tiger()));
    }

    #[test]
    fn test_label_is_its_own_parent() {
        assert!(tiger().is_parent(&tiger()));
        assert_eq!(tiger().common(&tiger()).len(), tiger().depth());
    }

    #[test]
    fn test_is_related_is_directional() {
        let cat = Label::new(["animal", "mammal", "cat"]).with_related(["tiger"]);
        assert!(cat.is_related(&tiger()));
        assert!(!tiger().is_related(&cat));
    }

    #[test]
    fn test_union_interleaves_positions() {
        let u = tiger().union(&mammal());
        assert_eq!(u.classes(), &["animal", "mammal", "tiger"]);

        let a = Label::new(["a", "b"]).with_alt(["x"]);
        let b = Label::new(["a", "c", "d"]).with_alt(["y", "x"]);
        let u = a.union(&b);
        assert_eq!(u.classes(), &["a", "b", "c", "d"]);
        assert_eq!(u.alt(), &["x", "y"]);
    }

    #[test]
    fn test_union_keeps_receiver_dataset() {
        let mut a = tiger();
        a.bind(Arc::from("imagenet"), 7);
        let u = a.union(&mammal());
        assert_eq!(u.dataset(), Some("imagenet"));
        assert_eq!(u.class_index(), Some(7));
        assert!(mammal().union(&a).dataset().is_none());
    }

    #[test]
    fn test_intersection() {
        let a = tiger().with_related(["cat", "stripes"]);
        let b = lion().with_related(["stripes", "mane"]);
        let i = a.intersection(&b);
        assert_eq!(i.classes(), &["animal", "mammal"]);
        assert_eq!(i.related(), &["stripes"]);
        assert!(i.alt().is_empty());
    }

    #[test]
    fn test_keywords_order() {
        let label = tiger().with_alt(["tigress"]).with_related(["cat"]);
        let words: Vec<&str> = label.keywords().collect();
        assert_eq!(words, vec!["animal", "mammal", "tiger", "tigress", "cat"]);
    }

    #[test]
    fn test_canonical_key() {
        let mut label = Label::new(["vehicle", "Sports Car"]);
        assert_eq!(label.canonical_key(), "sports-car--1-");
        label.bind(Arc::from("Open Images"), 12);
        assert_eq!(label.canonical_key(), "sports-car-12-open-images");
    }

    #[test]
    fn test_hash_follows_classes() {
        use std::collections::HashSet;
        let set: HashSet<Label> = [tiger(), tiger().with_alt(["tigress"]), lion()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
