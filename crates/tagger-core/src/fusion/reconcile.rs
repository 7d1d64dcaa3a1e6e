//! Pairwise reconciliation of two models' predictions.
//!
//! Each pair holds what two models said about the same image or region.
//! Confidences are first boosted by how often each label recurs on its own
//! side, then the two labels are compared through the taxonomy: a parent is
//! refined into its more specific child, a related label gets a nudge, and
//! the bar a prediction must clear rises as the labels grow further apart.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::FusionConfig;
use crate::taxonomy::Label;

use super::bias::adjust;
use super::prediction::Prediction;

/// A label that won its pair, with its adjusted confidence.
#[derive(Debug, Clone, Serialize)]
pub struct FusedLabel {
    pub label: Label,
    pub confidence: f32,
}

/// Fuses paired predictions into one label per pair.
pub struct FusionEngine {
    config: FusionConfig,
}

impl FusionEngine {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// One winner per pair that produced one, in pair order.
    ///
    /// Duplicates across pairs are kept; grouping happens in tag synthesis.
    pub fn fuse(&self, pairs: &[(Prediction, Prediction)]) -> Vec<FusedLabel> {
        let mut counts_a: HashMap<String, usize> = HashMap::new();
        let mut counts_b: HashMap<String, usize> = HashMap::new();
        for (a, b) in pairs {
            *counts_a.entry(a.key()).or_default() += 1;
            *counts_b.entry(b.key()).or_default() += 1;
        }

        let fused: Vec<FusedLabel> = pairs
            .iter()
            .filter_map(|(a, b)| {
                let xc = self.adjusted(a, &counts_a);
                let yc = self.adjusted(b, &counts_b);
                self.reconcile(a.label(), xc, b.label(), yc)
            })
            .collect();

        tracing::debug!("Fused {} pairs into {} labels", pairs.len(), fused.len());
        fused
    }

    fn adjusted(&self, prediction: &Prediction, counts: &HashMap<String, usize>) -> f32 {
        if !self.config.apply_bias {
            return prediction.confidence().clamp(0.0, 1.0);
        }
        let n = counts.get(&prediction.key()).copied().unwrap_or(1);
        adjust(prediction.confidence(), n)
    }

    /// Decide between `x` and `y` given their adjusted confidences.
    pub fn reconcile(&self, x: &Label, xc: f32, y: &Label, yc: f32) -> Option<FusedLabel> {
        let cfg = &self.config;
        let mut x = x.clone();
        let mut y = y.clone();
        let mut xc = xc;
        let mut yc = yc;
        let mut threshold = cfg.parent_threshold;

        if x == y {
            // Same path, nothing to merge
        } else if x.is_parent(&y) && xc >= cfg.parent_threshold {
            if yc >= cfg.parent_threshold {
                x = y.union(&x);
            }
        } else if y.is_parent(&x) && yc >= cfg.parent_threshold {
            if xc >= cfg.parent_threshold {
                y = x.union(&y);
            }
        } else if x.is_related(&y) {
            xc = (xc + cfg.related_boost).min(1.0);
        } else if y.is_related(&x) {
            yc = (yc + cfg.related_boost).min(1.0);
        } else if x.common(&y).len() >= cfg.sibling_depth {
            threshold = cfg.sibling_threshold;
        } else {
            threshold = cfg.unrelated_threshold;
        }

        let x_passes = xc >= threshold;
        let y_passes = yc >= threshold;
        let winner = match (x_passes, y_passes) {
            (true, true) if xc >= yc => Some((x, xc)),
            (true, true) => Some((y, yc)),
            (true, false) => Some((x, xc)),
            (false, true) => Some((y, yc)),
            (false, false) => None,
        };

        match &winner {
            Some((label, confidence)) => tracing::trace!(
                "Pair resolved to '{}' ({:.3}, threshold {:.2})",
                label.name(),
                confidence,
                threshold
            ),
            None => tracing::trace!(
                "Pair dropped: {:.3} / {:.3} below threshold {:.2}",
                xc,
                yc,
                threshold
            ),
        }

        winner.map(|(label, confidence)| FusedLabel { label, confidence })
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}
