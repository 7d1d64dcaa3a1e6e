//! Model outputs resolved against a dataset.

use crate::geometry::BoundingBox;
use crate::taxonomy::{Dataset, Label};

/// A whole-image classification result.
#[derive(Debug, Clone)]
pub struct NetPrediction {
    pub label: Label,
    pub confidence: f32,
}

impl NetPrediction {
    pub fn new(label: Label, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Turn a model's raw `(class_index, confidence)` output into a prediction.
    ///
    /// Unknown indices are logged and yield `None`.
    pub fn resolve(dataset: &Dataset, class_index: usize, confidence: f32) -> Option<Self> {
        match dataset.get(class_index) {
            Some(label) => Some(Self::new(label.clone(), confidence)),
            None => {
                tracing::warn!(
                    "Class index {} out of range for dataset '{}' ({} labels)",
                    class_index,
                    dataset.name(),
                    dataset.len()
                );
                None
            }
        }
    }
}

/// A detection: a label bound to a region of the image.
#[derive(Debug, Clone)]
pub struct BoxPrediction {
    pub label: Label,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl BoxPrediction {
    pub fn new(label: Label, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label,
            confidence,
            bbox,
        }
    }

    /// Same canonical key as the equivalent [`Prediction`].
    pub fn key(&self) -> String {
        self.label.canonical_key()
    }
}

/// One model output, either whole-image or region based.
#[derive(Debug, Clone)]
pub enum Prediction {
    Net(NetPrediction),
    Box(BoxPrediction),
}

impl Prediction {
    pub fn label(&self) -> &Label {
        match self {
            Prediction::Net(p) => &p.label,
            Prediction::Box(p) => &p.label,
        }
    }

    pub fn confidence(&self) -> f32 {
        match self {
            Prediction::Net(p) => p.confidence,
            Prediction::Box(p) => p.confidence,
        }
    }

    /// The detection region, for box predictions.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        match self {
            Prediction::Net(_) => None,
            Prediction::Box(p) => Some(&p.bbox),
        }
    }

    /// `"{name}-{class_index}-{dataset}"`, lowercased, spaces as dashes.
    pub fn key(&self) -> String {
        self.label().canonical_key()
    }
}

impl From<NetPrediction> for Prediction {
    fn from(p: NetPrediction) -> Self {
        Prediction::Net(p)
    }
}

impl From<BoxPrediction> for Prediction {
    fn from(p: BoxPrediction) -> Self {
        Prediction::Box(p)
    }
}

/// Align two models' outputs position by position.
///
/// The shorter list bounds the result; surplus predictions are dropped.
pub fn pair_predictions<T>(a: Vec<T>, b: Vec<T>) -> Vec<(T, T)> {
    if a.len() != b.len() {
        tracing::debug!(
            "Pairing mismatched prediction lists ({} vs {}), truncating",
            a.len(),
            b.len()
        );
    }
    a.into_iter().zip(b).collect()
}
