//! Named label sets with a keyword relation graph.
//!
//! A dataset is built in two phases. [`DatasetBuilder`] collects relations
//! between words; [`DatasetBuilder::register`] then binds the labels, copies
//! relation words onto them, and returns a sealed [`Dataset`]. Once sealed the
//! relation graph can no longer change, so every label sees the same graph.

use std::collections::HashMap;
use std::sync::Arc;

use super::label::Label;

/// Collects word relations before labels are registered.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    name: String,
    relations: HashMap<String, Vec<String>>,
}

impl DatasetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relations: HashMap::new(),
        }
    }

    /// Record a bidirectional relation between two words.
    ///
    /// Repeated calls are idempotent. Relating a word to itself is ignored.
    pub fn relate(&mut self, a: &str, b: &str) -> &mut Self {
        if a == b {
            return self;
        }
        self.link(a, b);
        self.link(b, a);
        self
    }

    /// Words related to `word`, in the order they were related.
    pub fn related_words(&self, word: &str) -> &[String] {
        self.relations.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    fn link(&mut self, from: &str, to: &str) {
        let words = self.relations.entry(from.to_string()).or_default();
        if !words.iter().any(|w| w == to) {
            words.push(to.to_string());
        }
    }

    /// Bind `labels` to the dataset in order and seal it.
    ///
    /// Each label gets its position as class index. Every word the relation
    /// graph associates with one of the label's classes is appended to the
    /// label's related words.
    pub fn register(self, labels: Vec<Label>) -> Dataset {
        let name: Arc<str> = Arc::from(self.name.as_str());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        let labels: Vec<Label> = labels
            .into_iter()
            .enumerate()
            .map(|(index, mut label)| {
                label.bind(Arc::clone(&name), index);
                let words: Vec<String> = label
                    .classes()
                    .iter()
                    .flat_map(|class| self.related_words(class).iter().cloned())
                    .collect();
                for word in &words {
                    label.add_related(word);
                }
                by_name
                    .entry(label.name().to_string())
                    .or_default()
                    .push(index);
                label
            })
            .collect();

        tracing::debug!(
            "Registered dataset '{}': {} labels, {} related words",
            name,
            labels.len(),
            self.relations.len()
        );

        Dataset {
            name,
            labels,
            by_name,
            relations: self.relations,
        }
    }
}

/// A sealed, immutable set of labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: Arc<str>,
    labels: Vec<Label>,
    by_name: HashMap<String, Vec<usize>>,
    relations: HashMap<String, Vec<String>>,
}

impl Dataset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The label at `class_index`.
    pub fn get(&self, class_index: usize) -> Option<&Label> {
        self.labels.get(class_index)
    }

    /// All labels whose proper name is `name`. Homonyms yield several.
    pub fn by_name(&self, name: &str) -> Vec<&Label> {
        self.by_name
            .get(name)
            .map(|indices| indices.iter().map(|&i| &self.labels[i]).collect())
            .unwrap_or_default()
    }

    /// True when an equal label (same class path) is registered here.
    pub fn contains(&self, label: &Label) -> bool {
        self.by_name
            .get(label.name())
            .is_some_and(|indices| indices.iter().any(|&i| &self.labels[i] == label))
    }

    /// True when some registered label has the proper name `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Words related to `word` in this dataset's relation graph.
    pub fn related_words(&self, word: &str) -> &[String] {
        self.relations.get(word).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Dataset {
        let mut builder = DatasetBuilder::new("animals");
        builder.relate("cat", "tiger").relate("cat", "lion");
        builder.register(vec![
            Label::new(["animal", "mammal", "cat"]),
            Label::new(["animal", "mammal", "tiger"]),
            Label::new(["animal", "mammal", "lion"]),
            Label::new(["animal", "bird", "crane"]),
            Label::new(["machine", "crane"]),
        ])
    }

    #[test]
    fn test_register_assigns_indices() {
        let ds = animals();
        assert_eq!(ds.name(), "animals");
        assert_eq!(ds.len(), 5);
        for (i, label) in ds.labels().iter().enumerate() {
            assert_eq!(label.class_index(), Some(i));
            assert_eq!(label.dataset(), Some("animals"));
        }
        assert_eq!(ds.get(1).map(Label::name), Some("tiger"));
        assert!(ds.get(5).is_none());
    }

    #[test]
    fn test_relate_is_bidirectional() {
        let mut builder = DatasetBuilder::new("x");
        builder.relate("cat", "tiger");
        assert_eq!(builder.related_words("cat"), &["tiger"]);
        assert_eq!(builder.related_words("tiger"), &["cat"]);
    }

    #[test]
    fn test_relate_is_idempotent() {
        let mut builder = DatasetBuilder::new("x");
        builder.relate("cat", "tiger").relate("tiger", "cat").relate("cat", "tiger");
        builder.relate("cat", "cat");
        assert_eq!(builder.related_words("cat"), &["tiger"]);
        assert_eq!(builder.related_words("tiger"), &["cat"]);
    }

    #[test]
    fn test_register_back_propagates_relations() {
        let ds = animals();
        let cat = ds.get(0).unwrap();
        assert_eq!(cat.related(), &["tiger", "lion"]);
        let tiger = ds.get(1).unwrap();
        assert_eq!(tiger.related(), &["cat"]);
        assert!(cat.is_related(tiger));
        assert!(tiger.is_related(cat));
        assert!(ds.get(3).unwrap().related().is_empty());
    }

    #[test]
    fn test_register_keeps_existing_related() {
        let mut builder = DatasetBuilder::new("x");
        builder.relate("tiger", "cat");
        let ds = builder.register(vec![
            Label::new(["animal", "tiger"]).with_related(["stripes", "cat"]),
        ]);
        assert_eq!(ds.get(0).unwrap().related(), &["stripes", "cat"]);
    }

    #[test]
    fn test_homonyms() {
        let ds = animals();
        let cranes = ds.by_name("crane");
        assert_eq!(cranes.len(), 2);
        assert_eq!(cranes[0].classes(), &["animal", "bird", "crane"]);
        assert_eq!(cranes[1].classes(), &["machine", "crane"]);
        assert!(ds.by_name("zebra").is_empty());
    }

    #[test]
    fn test_contains() {
        let ds = animals();
        assert!(ds.contains(&Label::new(["machine", "crane"])));
        assert!(!ds.contains(&Label::new(["toy", "crane"])));
        assert!(ds.contains_name("crane"));
        assert!(!ds.contains_name("zebra"));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = DatasetBuilder::new("empty").register(vec![]);
        assert!(ds.is_empty());
        assert!(ds.get(0).is_none());
    }
}
