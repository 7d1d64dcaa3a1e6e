//! Confidence bias for repeatedly observed labels.

/// Asymptote of the bias curve.
const CEILING: f64 = 0.4988;
/// Logistic slope per observation.
const SLOPE: f64 = 0.62;
/// Logistic offset; keeps a single observation near zero.
const OFFSET: f64 = 5.0;

/// Bonus for a label seen `n` times on one side of the pair list.
///
/// `bias(n) = 0.4988 - 1 / (e^(0.62n - 5) + 2)`: about zero for one
/// observation, rising toward 0.5 as the same label keeps recurring.
pub fn bias(n: usize) -> f32 {
    let n = n as f64;
    (CEILING - 1.0 / ((SLOPE * n - OFFSET).exp() + 2.0)) as f32
}

/// `confidence + bias(n)`, clamped to `[0, 1]`.
pub fn adjust(confidence: f32, n: usize) -> f32 {
    (confidence + bias(n)).clamp(0.0, 1.0)
}
