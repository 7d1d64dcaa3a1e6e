//! The fixed palette of named reference colors.

use std::sync::LazyLock;

use super::difference::cie00;
use super::space::Color;

/// A palette entry with a human-readable name.
#[derive(Debug, Clone)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
    /// Black, white and gray.
    pub grayscale: bool,
}

impl NamedColor {
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

/// Name, sRGB bytes, grayscale flag. Declaration order breaks distance ties.
const PALETTE: &[(&str, [u8; 3], bool)] = &[
    ("black", [0x00, 0x00, 0x00], true),
    ("white", [0xFF, 0xFF, 0xFF], true),
    ("gray", [0x80, 0x80, 0x80], true),
    ("red", [0xE7, 0x25, 0x25], false),
    ("orange", [0xF4, 0x87, 0x00], false),
    ("amber", [0xEC, 0xA7, 0x1D], false),
    ("yellow", [0xF1, 0xF1, 0x2A], false),
    ("lime", [0xA9, 0xE4, 0x18], false),
    ("green", [0x06, 0xD5, 0x06], false),
    ("teal", [0x0E, 0xCB, 0x9C], false),
    ("turquoise", [0x1A, 0xE0, 0xE0], false),
    ("aqua", [0x0B, 0xBB, 0xF5], false),
    ("azure", [0x20, 0x55, 0xF8], false),
    ("blue", [0x00, 0x00, 0xFF], false),
    ("purple", [0x7F, 0x00, 0xFF], false),
    ("orchid", [0xBF, 0x00, 0xFF], false),
    ("magenta", [0xEA, 0x06, 0xB1], false),
];

static COLORS: LazyLock<Vec<NamedColor>> = LazyLock::new(|| {
    PALETTE
        .iter()
        .map(|&(name, [r, g, b], grayscale)| NamedColor {
            name,
            color: Color::from_rgb(r, g, b),
            grayscale,
        })
        .collect()
});

/// All named colors in declaration order.
pub fn colors() -> &'static [NamedColor] {
    &COLORS
}

/// Look up a named color.
pub fn by_name(name: &str) -> Option<&'static NamedColor> {
    colors().iter().find(|c| c.name == name)
}

/// The named color perceptually closest (CIEDE2000) to `color`.
///
/// Ties go to the entry declared first.
pub fn find_closest(color: &Color) -> &'static NamedColor {
    let mut best = &colors()[0];
    let mut best_distance = cie00(color, &best.color);
    for candidate in &colors()[1..] {
        let distance = cie00(color, &candidate.color);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}
