//! Color tags from an extracted palette.

use crate::color::PaletteEntry;

/// Tag emitted instead of individual names when the palette has no hue.
pub const BLACK_AND_WHITE: &str = "black-and-white";

/// Named color tags for a palette, in extraction order.
///
/// If every entry maps to a grayscale name the image is tagged
/// `black-and-white` alone. Otherwise each distinct name is kept, gray
/// shades included.
pub fn color_tags(palette: &[PaletteEntry]) -> Vec<String> {
    if palette.is_empty() {
        return vec![];
    }

    let named: Vec<_> = palette.iter().map(PaletteEntry::closest).collect();
    if named.iter().all(|c| c.grayscale) {
        return vec![BLACK_AND_WHITE.to_string()];
    }

    let mut names: Vec<String> = Vec::new();
    for color in named {
        if !names.iter().any(|n| n == color.name) {
            names.push(color.name.to_string());
        }
    }
    names
}
