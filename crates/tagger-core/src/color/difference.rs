//! Perceptual color difference metrics.

use palette::color_difference::{Ciede2000, DeltaE};

use super::space::{Color, Lab};

/// CIE 1976 color difference: Euclidean distance in Lab space.
pub fn cie76(a: &Color, b: &Color) -> f64 {
    a.to_lab().delta_e(b.to_lab())
}

/// CIEDE2000 color difference between two colors (`kL = kC = kH = 1`).
pub fn cie00(a: &Color, b: &Color) -> f64 {
    ciede2000(a.to_lab(), b.to_lab())
}

/// CIEDE2000 on raw Lab values.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    lab1.difference(lab2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(l: f64, a: f64, b: f64) -> Lab {
        Lab::new(l, a, b)
    }

    // Reference pairs from Sharma, Wu & Dalal's CIEDE2000 test data.
    const REFERENCE: &[((f64, f64, f64), (f64, f64, f64), f64)] = &[
        ((50.0, 2.6772, -79.7751), (50.0, 0.0, -82.7485), 2.0425),
        ((50.0, 3.1571, -77.2803), (50.0, 0.0, -82.7485), 2.8615),
        ((50.0, 2.8361, -74.0200), (50.0, 0.0, -82.7485), 3.4412),
        ((50.0, 0.0, 0.0), (50.0, -1.0, 2.0), 2.3669),
        ((50.0, 2.49, -0.001), (50.0, -2.49, 0.0009), 7.1792),
        ((50.0, 2.49, -0.001), (50.0, -2.49, 0.0010), 7.1792),
        ((50.0, 2.49, -0.001), (50.0, -2.49, 0.0011), 7.2195),
        ((50.0, 2.5, 0.0), (73.0, 25.0, -18.0), 27.1492),
    ];

    #[test]
    fn test_ciede2000_reference_pairs() {
        for &((l1, a1, b1), (l2, a2, b2), expected) in REFERENCE {
            let d = ciede2000(lab(l1, a1, b1), lab(l2, a2, b2));
            assert!(
                (d - expected).abs() < 5e-4,
                "({l1}, {a1}, {b1}) vs ({l2}, {a2}, {b2}): got {d}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_cie00_identity_and_symmetry() {
        let colors = [
            Color::from_rgb(231, 37, 37),
            Color::from_rgb(0, 0, 255),
            Color::from_rgb(128, 128, 128),
            Color::from_rgb(14, 203, 156),
        ];
        for a in &colors {
            assert_eq!(cie00(a, a), 0.0);
            for b in &colors {
                assert!((cie00(a, b) - cie00(b, a)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_cie76_is_lab_distance() {
        let black = Color::from_rgb(0, 0, 0);
        let white = Color::from_rgb(255, 255, 255);
        assert!((cie76(&black, &white) - 100.0).abs() < 0.01);
        assert_eq!(cie76(&white, &white), 0.0);
    }

    #[test]
    fn test_cie00_orders_perceptual_closeness() {
        let red = Color::from_rgb(231, 37, 37);
        let dark_red = Color::from_rgb(200, 30, 30);
        let blue = Color::from_rgb(0, 0, 255);
        assert!(cie00(&red, &dark_red) < cie00(&red, &blue));
    }
}
