//! CIE XYZ colors and conversions to sRGB, hex, Lab and LCh.

use palette::white_point::D65;
use palette::{FromColor, Xyz};

use crate::error::ColorError;

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41239080, 0.35758434, 0.18048079],
    [0.21263901, 0.71516868, 0.07219232],
    [0.01933082, 0.11919478, 0.95053215],
];

const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.24096994, -1.53738318, -0.49861076],
    [-0.96924364, 1.8759675, 0.04155506],
    [0.05563008, -0.20397696, 1.05697151],
];

/// A color in CIE L*a*b* space, relative to D65.
pub type Lab = palette::Lab<D65, f64>;

/// A color in CIE LCh(ab) space, relative to D65.
pub type Lch = palette::Lch<D65, f64>;

/// An immutable CIE XYZ color.
///
/// Components are stored on the 0–1 scale produced by the sRGB matrix and
/// must lie within `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    x: f64,
    y: f64,
    z: f64,
}

impl Color {
    /// Create a color from XYZ components, rejecting values outside `[0, 255]`.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, ColorError> {
        for (component, value) in [('x', x), ('y', y), ('z', z)] {
            if !(0.0..=255.0).contains(&value) {
                return Err(ColorError::OutOfRange { component, value });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Convert an sRGB byte triple.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let linear = [r, g, b].map(|v| srgb_to_linear(v as f64 / 255.0));
        let [x, y, z] = mat_mul(&SRGB_TO_XYZ, linear);
        // The matrix maps [0, 1]^3 into [0, 1.09], always within range.
        Self { x, y, z }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(s.to_string()))
        };
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Convert back from Lab, clamping any out-of-gamut component into range.
    pub fn from_lab(lab: Lab) -> Self {
        let (x, y, z) = Xyz::<D65, f64>::from_color(lab).into_components();
        let clamp = |v: f64| v.clamp(0.0, 255.0);
        Self {
            x: clamp(x),
            y: clamp(y),
            z: clamp(z),
        }
    }

    pub fn to_xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Gamma-compressed sRGB bytes.
    pub fn to_rgb(&self) -> [u8; 3] {
        let linear = mat_mul(&XYZ_TO_SRGB, [self.x, self.y, self.z]);
        linear.map(|v| (linear_to_srgb(v) * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub fn to_lab(&self) -> Lab {
        Lab::from_color(self.as_xyz())
    }

    /// LCh with hue in degrees, `[0, 360)` via `hue.into_positive_degrees()`.
    pub fn to_lch(&self) -> Lch {
        Lch::from_color(self.to_lab())
    }

    fn as_xyz(&self) -> Xyz<D65, f64> {
        Xyz::new(self.x, self.y, self.z)
    }
}

fn srgb_to_linear(u: f64) -> f64 {
    if u <= 0.04045 {
        u / 12.92
    } else {
        ((u + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(u: f64) -> f64 {
    if u <= 0.0031308 {
        12.92 * u
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    }
}

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Color::new(0.0, 128.0, 255.0).is_ok());
        let err = Color::new(-0.1, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            ColorError::OutOfRange {
                component: 'x',
                value: -0.1
            }
        );
        assert!(Color::new(0.0, 0.0, 255.5).is_err());
        assert!(Color::new(0.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        for hex in ["#000000", "#FFFFFF", "#E72525", "#0BBBF5", "#7F00FF", "#123456"] {
            assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
        }
        assert_eq!(Color::from_hex("a9e418").unwrap().to_hex(), "#A9E418");
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_white_lab() {
        // The sRGB matrix rows sum slightly off the D65 white, leaving b* near -0.013
        let lab = Color::from_rgb(255, 255, 255).to_lab();
        assert!((lab.l - 100.0).abs() < 0.01);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.02);
    }

    #[test]
    fn test_black_lab() {
        let lab = Color::from_rgb(0, 0, 0).to_lab();
        assert!(lab.l.abs() < 1e-9);
        assert!(lab.a.abs() < 1e-9);
        assert!(lab.b.abs() < 1e-9);
    }

    #[test]
    fn test_red_lab() {
        let lab = Color::from_rgb(255, 0, 0).to_lab();
        assert!((lab.l - 53.24).abs() < 0.05);
        assert!((lab.a - 80.09).abs() < 0.05);
        assert!((lab.b - 67.20).abs() < 0.05);
    }

    #[test]
    fn test_lch_hue_range() {
        // Blue sits at a negative atan2 angle before normalization
        let lch = Color::from_rgb(0, 0, 255).to_lch();
        let hue = lch.hue.into_positive_degrees();
        assert!((0.0..360.0).contains(&hue));
        assert!(hue > 270.0);
        assert!(lch.chroma > 100.0);
    }

    #[test]
    fn test_lab_round_trip() {
        let color = Color::from_rgb(12, 200, 99);
        assert_eq!(Color::from_lab(color.to_lab()).to_rgb(), [12, 200, 99]);
    }
}
