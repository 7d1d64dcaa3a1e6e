//! Multi-model prediction fusion.
//!
//! - **prediction**: net and box predictions, positional pairing
//! - **bias**: confidence bonus for labels that keep recurring
//! - **reconcile**: the pairwise decision between two models' labels
//! - **merge**: folding overlapping detections of one label together

pub mod bias;
pub mod merge;
pub mod prediction;
pub mod reconcile;

pub use bias::bias;
pub use merge::{merge_overlapping, merge_overlapping_pairs};
pub use prediction::{pair_predictions, BoxPrediction, NetPrediction, Prediction};
pub use reconcile::{FusedLabel, FusionEngine};

/// Threshold for two labels with no shared hierarchy or relation.
///
/// Earlier deployments used `0.7`; override through
/// [`FusionConfig::unrelated_threshold`](crate::config::FusionConfig).
pub const DEFAULT_UNRELATED_THRESHOLD: f32 = 0.5;
