//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::fusion::DEFAULT_UNRELATED_THRESHOLD;

/// Thresholds for pairwise reconciliation of two models' predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Add the frequency bias to every confidence before reconciling
    pub apply_bias: bool,

    /// Minimum adjusted confidence for a parent label to be refined by its child
    pub parent_threshold: f32,

    /// Confidence added to a prediction whose related words name the other
    pub related_boost: f32,

    /// Threshold when both labels share at least `sibling_depth` levels
    pub sibling_threshold: f32,

    /// Shared prefix length from which two labels count as siblings
    pub sibling_depth: usize,

    /// Threshold for labels with nothing in common
    pub unrelated_threshold: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            apply_bias: true,
            parent_threshold: 0.25,
            related_boost: 0.1,
            sibling_threshold: 0.4,
            sibling_depth: 2,
            unrelated_threshold: DEFAULT_UNRELATED_THRESHOLD,
        }
    }
}

/// Dominant color extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of dominant colors to extract
    pub colors: usize,

    /// Maximum pixels fed to clustering; larger images are strided
    pub max_samples: usize,

    /// Maximum k-means iterations
    pub iterations: usize,

    /// Stop once no center moves more than this (Lab units)
    pub epsilon: f64,

    /// RNG seed for k-means++ center selection
    pub seed: u64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: 5,
            max_samples: 10_000,
            iterations: 20,
            epsilon: 0.5,
            seed: 42,
        }
    }
}

/// Tag synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// Aspect difference `|w/h - h/w|` up to which an image counts as square
    pub orientation_tolerance: f64,

    /// Emit keyword tags expanded from each fused label
    pub include_keywords: bool,

    /// Emit color tags from the extracted palette
    pub include_colors: bool,

    /// Words never emitted as keywords, on top of the built-in stoplist
    pub extra_stopwords: Vec<String>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            orientation_tolerance: 0.1,
            include_keywords: true,
            include_colors: true,
            extra_stopwords: vec![],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 10000,
            decode_timeout_ms: 5000,
        }
    }
}

/// Where taxonomy files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Directory holding `<dataset>.toml` taxonomy files
    pub dir: String,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            dir: "~/.tagger/taxonomies".to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
