//! Hierarchical labels and the datasets that own them.
//!
//! - **label**: class paths and their algebra (common prefix, parenthood, union)
//! - **dataset**: two-phase builder and the sealed label registry
//! - **file**: TOML taxonomy definitions

pub mod dataset;
pub mod file;
pub mod label;

pub use dataset::{Dataset, DatasetBuilder};
pub use file::{load_dataset, LabelEntry, TaxonomyFile};
pub use label::Label;
