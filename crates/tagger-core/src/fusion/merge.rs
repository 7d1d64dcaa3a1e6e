//! Merging overlapping detections of the same label.

use crate::geometry::BoundingBox;

use super::prediction::{BoxPrediction, Prediction};

/// Combine detections that share a label and whose boxes overlap.
///
/// Detections are visited in order; each one is folded into the first kept
/// detection with the same key whose box it intersects, growing that box to
/// the bounding union and keeping the higher confidence. Disjoint detections
/// of the same label stay separate.
pub fn merge_overlapping(detections: &[BoxPrediction]) -> Vec<BoxPrediction> {
    let mut merged: Vec<BoxPrediction> = Vec::with_capacity(detections.len());

    for detection in detections {
        let target = merged
            .iter_mut()
            .find_map(|kept| grown(kept, detection).map(|bbox| (kept, bbox)));

        match target {
            Some((kept, bbox)) => absorb(kept, detection, bbox),
            None => merged.push(detection.clone()),
        }
    }

    tracing::debug!(
        "Merged {} detections into {}",
        detections.len(),
        merged.len()
    );
    merged
}

/// [`merge_overlapping`] over aligned pairs, keeping them aligned.
///
/// A pair folds into the first kept pair where both sides are detections and
/// each side merges with its counterpart. Pairs holding a whole-image
/// prediction are never merged. Kept pairs stay in first-seen order.
pub fn merge_overlapping_pairs(
    pairs: Vec<(Prediction, Prediction)>,
) -> Vec<(Prediction, Prediction)> {
    let total = pairs.len();
    let mut merged: Vec<(Prediction, Prediction)> = Vec::with_capacity(total);

    for pair in pairs {
        let hit = detections(&pair).and_then(|(a, b)| {
            merged.iter().enumerate().find_map(|(i, kept)| {
                let (kept_a, kept_b) = detections(kept)?;
                Some((i, grown(kept_a, a)?, grown(kept_b, b)?))
            })
        });

        match (hit, pair) {
            (Some((i, bbox_a, bbox_b)), (Prediction::Box(a), Prediction::Box(b))) => {
                if let (Prediction::Box(kept_a), Prediction::Box(kept_b)) = &mut merged[i] {
                    absorb(kept_a, &a, bbox_a);
                    absorb(kept_b, &b, bbox_b);
                }
            }
            (_, pair) => merged.push(pair),
        }
    }

    tracing::debug!("Merged {} prediction pairs into {}", total, merged.len());
    merged
}

fn detections(pair: &(Prediction, Prediction)) -> Option<(&BoxPrediction, &BoxPrediction)> {
    match pair {
        (Prediction::Box(a), Prediction::Box(b)) => Some((a, b)),
        _ => None,
    }
}

/// The box `kept` grows to when `detection` folds into it.
fn grown(kept: &BoxPrediction, detection: &BoxPrediction) -> Option<BoundingBox> {
    if kept.key() != detection.key() {
        return None;
    }
    kept.bbox.union(&detection.bbox)
}

fn absorb(kept: &mut BoxPrediction, detection: &BoxPrediction, bbox: BoundingBox) {
    kept.bbox = bbox;
    kept.confidence = kept.confidence.max(detection.confidence);
}
