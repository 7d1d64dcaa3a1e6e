//! Tagger Core - prediction fusion and tag synthesis for images.
//!
//! Several independent classifiers and detectors look at the same image.
//! This crate reconciles their raw `(class, confidence)` outputs through a
//! label taxonomy and turns the result into a ranked set of tags.
//!
//! # Architecture
//!
//! ```text
//! model outputs → resolve (Dataset) → fuse pairs → group + expand → TagReport
//!                                     image → palette (k-means) ┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tagger_core::{Config, Tagger, pair_predictions};
//!
//! let tagger = Tagger::new(Config::load()?)?;
//! let pairs = pair_predictions(model_a, model_b);
//! let report = tagger.tag(&image, &pairs);
//! println!("{}", serde_json::to_string(&report)?);
//! ```

pub mod color;
pub mod config;
pub mod decode;
pub mod error;
pub mod fusion;
pub mod geometry;
pub mod output;
pub mod tagging;
pub mod taxonomy;
pub mod types;

use std::path::Path;

use image::DynamicImage;

pub use color::{extract_palette, find_closest, Color, PaletteEntry, PaletteExtractor};
pub use config::Config;
pub use decode::{DecodedImage, ImageDecoder};
pub use error::{
    ColorError, ConfigError, GeometryError, PipelineError, PipelineResult, Result, TaggerError,
    TaxonomyError,
};
pub use fusion::{
    merge_overlapping, merge_overlapping_pairs, pair_predictions, BoxPrediction, FusedLabel,
    FusionEngine, NetPrediction, Prediction,
};
pub use geometry::{BoundingBox, BoxType};
pub use output::{OutputFormat, OutputWriter};
pub use tagging::TagSynthesizer;
pub use taxonomy::{Dataset, DatasetBuilder, Label, TaxonomyFile};
pub use types::{Orientation, Tag, TagReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main entry point: fusion, palette extraction and tag synthesis wired
/// to one configuration.
pub struct Tagger {
    config: Config,
    fusion: FusionEngine,
    palette: PaletteExtractor,
    synthesizer: TagSynthesizer,
}

impl Tagger {
    /// Build a tagger, rejecting out-of-range configuration values.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        tracing::debug!("Initializing Tagger v{}", VERSION);
        Ok(Self {
            fusion: FusionEngine::new(config.fusion.clone()),
            palette: PaletteExtractor::new(config.palette.clone()),
            synthesizer: TagSynthesizer::new(config.tagging.clone()),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reconcile paired predictions into winning labels.
    pub fn fuse(&self, pairs: &[(Prediction, Prediction)]) -> Vec<FusedLabel> {
        self.fusion.fuse(pairs)
    }

    /// Dominant colors of `image`, most populous first.
    pub fn palette(&self, image: &DynamicImage) -> Vec<PaletteEntry> {
        self.palette.extract(image)
    }

    /// Full report for an already decoded image.
    pub fn tag(&self, image: &DynamicImage, pairs: &[(Prediction, Prediction)]) -> TagReport {
        let fused = self.fuse(pairs);
        let palette = if self.config.tagging.include_colors {
            self.palette(image)
        } else {
            vec![]
        };
        self.synthesizer
            .synthesize(&fused, &palette, image.width(), image.height())
    }

    /// Decode `path` within the configured limits, then tag it.
    pub async fn tag_file(
        &self,
        path: &Path,
        pairs: &[(Prediction, Prediction)],
    ) -> Result<TagReport> {
        let decoded = ImageDecoder::new(self.config.limits.clone())
            .decode(path)
            .await?;
        Ok(self.tag(&decoded.image, pairs))
    }
}
