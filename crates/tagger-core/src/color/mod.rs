//! Perceptual color engine.
//!
//! - **space**: XYZ colors and conversion to sRGB, hex, Lab and LCh
//! - **difference**: CIE76 and CIEDE2000 color distances
//! - **named**: the fixed palette of named reference colors
//! - **extract**: dominant color extraction (k-means in Lab space)

pub mod difference;
pub mod extract;
pub mod named;
pub mod space;

pub use difference::{cie00, cie76, ciede2000};
pub use extract::{extract_palette, PaletteEntry, PaletteExtractor, PaletteSummary};
pub use named::{colors, find_closest, NamedColor};
pub use space::{Color, Lab, Lch};
