//! Image orientation from its aspect ratio.

use crate::types::Orientation;

/// Classify `width x height`.
///
/// Square when `|w/h - h/w| <= tolerance`; zero-sized images are square.
pub fn orientation(width: u32, height: u32, tolerance: f64) -> Orientation {
    if width == 0 || height == 0 {
        return Orientation::Square;
    }
    let (w, h) = (width as f64, height as f64);
    if (w / h - h / w).abs() <= tolerance {
        Orientation::Square
    } else if width > height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(orientation(100, 100, 0.1), Orientation::Square);
        assert_eq!(orientation(1920, 1080, 0.1), Orientation::Landscape);
        assert_eq!(orientation(1080, 1920, 0.1), Orientation::Portrait);
    }

    #[test]
    fn test_near_square_within_tolerance() {
        // 102/100 - 100/102 ≈ 0.0396
        assert_eq!(orientation(102, 100, 0.1), Orientation::Square);
        // 110/100 - 100/110 ≈ 0.1909
        assert_eq!(orientation(110, 100, 0.1), Orientation::Landscape);
        assert_eq!(orientation(110, 100, 0.2), Orientation::Square);
    }

    #[test]
    fn test_zero_sized() {
        assert_eq!(orientation(0, 0, 0.1), Orientation::Square);
        assert_eq!(orientation(0, 50, 0.1), Orientation::Square);
    }
}
