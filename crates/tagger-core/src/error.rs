//! Error types for the tagging engine.
//!
//! The fusion, geometry and color algebra are pure functions whose only
//! failures are contract violations on their inputs. Those get small,
//! dedicated enums. Everything that touches the outside world (config files,
//! taxonomy files, image decoding) is grouped under [`TaggerError`].

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tagger operations.
#[derive(Error, Debug)]
pub enum TaggerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Taxonomy file errors
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid box geometry
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Invalid color input
    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while loading a taxonomy (dataset) file.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// Failed to read the taxonomy file
    #[error("Failed to read taxonomy {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the taxonomy file
    #[error("Failed to parse taxonomy {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A label entry has no classes
    #[error("Label #{index} in dataset '{dataset}' has an empty class path")]
    EmptyLabel { dataset: String, index: usize },
}

/// Image pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Malformed box input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A box needs exactly four coordinates
    #[error("Expected 4 box coordinates, got {0}")]
    PointCount(usize),
}

/// Malformed color input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// An XYZ component fell outside `[0, 255]`
    #[error("Color component {component} = {value} is outside [0, 255]")]
    OutOfRange { component: char, value: f64 },

    /// A hex string was not six hex digits (with optional leading '#')
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Convenience type alias for tagger results.
pub type Result<T> = std::result::Result<T, TaggerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
