//! On-disk taxonomy definitions.
//!
//! A taxonomy file is TOML with a dataset name, a list of word relations and
//! one `[[labels]]` table per class, in class-index order:
//!
//! ```toml
//! name = "imagenet"
//! relations = [["tiger", "cat"], ["snow", "winter"]]
//!
//! [[labels]]
//! classes = ["animal", "mammal", "tiger"]
//! alt = ["tigress"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

use super::dataset::{Dataset, DatasetBuilder};
use super::label::Label;

/// Parsed contents of a taxonomy file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyFile {
    pub name: String,
    #[serde(default)]
    pub relations: Vec<[String; 2]>,
    #[serde(default)]
    pub labels: Vec<LabelEntry>,
}

/// One label as written in a taxonomy file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelEntry {
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
}

impl TaxonomyFile {
    /// Read and parse a taxonomy file. `~` in the path is expanded.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let path = expand(path);
        let content = std::fs::read_to_string(&path).map_err(|source| TaxonomyError::Read {
            path: path.clone(),
            source,
        })?;
        let file: TaxonomyFile =
            toml::from_str(&content).map_err(|source| TaxonomyError::Parse {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            "Loaded taxonomy '{}' from {:?}: {} labels, {} relations",
            file.name,
            path,
            file.labels.len(),
            file.relations.len(),
        );
        Ok(file)
    }

    /// Relate every word pair, then register the labels in file order.
    pub fn into_dataset(self) -> Result<Dataset, TaxonomyError> {
        if let Some(index) = self.labels.iter().position(|e| e.classes.is_empty()) {
            return Err(TaxonomyError::EmptyLabel {
                dataset: self.name,
                index,
            });
        }

        let mut builder = DatasetBuilder::new(self.name);
        for [a, b] in &self.relations {
            builder.relate(a, b);
        }

        let labels = self
            .labels
            .into_iter()
            .map(|e| Label::new(e.classes).with_alt(e.alt).with_related(e.related))
            .collect();
        Ok(builder.register(labels))
    }
}

/// Load a taxonomy file straight into a sealed dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset, TaxonomyError> {
    TaxonomyFile::load(path)?.into_dataset()
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ANIMALS: &str = r#"
name = "animals"
relations = [["cat", "tiger"], ["cat", "lion"]]

[[labels]]
classes = ["animal", "mammal", "cat"]

[[labels]]
classes = ["animal", "mammal", "tiger"]
alt = ["tigress"]

[[labels]]
classes = ["machine", "crane"]
related = ["construction"]
"#;

    fn write_taxonomy(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_register() {
        let file = write_taxonomy(ANIMALS);
        let ds = load_dataset(file.path()).unwrap();

        assert_eq!(ds.name(), "animals");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.get(0).unwrap().related(), &["tiger", "lion"]);
        assert_eq!(ds.get(1).unwrap().alt(), &["tigress"]);
        assert_eq!(ds.get(1).unwrap().related(), &["cat"]);
        assert_eq!(ds.get(2).unwrap().related(), &["construction"]);
    }

    #[test]
    fn test_relations_and_labels_default_empty() {
        let file = write_taxonomy("name = \"bare\"\n");
        let parsed = TaxonomyFile::load(file.path()).unwrap();
        assert!(parsed.relations.is_empty());
        assert!(parsed.into_dataset().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = TaxonomyFile::load(Path::new("/nonexistent/taxonomy.toml")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_taxonomy("name = \"broken\"\nrelations = [[\"a\"]]\n");
        let err = TaxonomyFile::load(file.path()).unwrap_err();
        assert!(matches!(err, TaxonomyError::Parse { .. }));
    }

    #[test]
    fn test_empty_class_path_rejected() {
        let file = write_taxonomy("name = \"x\"\n\n[[labels]]\nclasses = [\"a\"]\n\n[[labels]]\nclasses = []\n");
        let err = load_dataset(file.path()).unwrap_err();
        match err {
            TaxonomyError::EmptyLabel { dataset, index } => {
                assert_eq!(dataset, "x");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
