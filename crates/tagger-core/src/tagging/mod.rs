//! Tag synthesis.
//!
//! Turns the fused labels of one image, its dominant colors and its size into
//! the final feature, keyword, color and orientation tags.

pub mod colors;
pub mod keywords;
pub mod orientation;
pub mod synthesis;

pub use colors::{color_tags, BLACK_AND_WHITE};
pub use keywords::KeywordExpander;
pub use orientation::orientation;
pub use synthesis::TagSynthesizer;
