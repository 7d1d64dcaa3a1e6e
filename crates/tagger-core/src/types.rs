//! Core output types of the tagging engine.

use serde::{Deserialize, Serialize};

/// The complete tagging result for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagReport {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Aspect class of the image
    pub orientation: Orientation,

    /// Tags ordered by kind: features, keywords, colors, orientation
    pub tags: Vec<Tag>,
}

impl TagReport {
    /// Feature tags as `(name, count)`.
    pub fn features(&self) -> impl Iterator<Item = (&str, u32)> {
        self.tags.iter().filter_map(|t| match t {
            Tag::Feature(name, count) => Some((name.as_str(), *count)),
            _ => None,
        })
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|t| match t {
            Tag::Keyword(word) => Some(word.as_str()),
            _ => None,
        })
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|t| match t {
            Tag::Color(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// One tag, serialized as `{"type": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Tag {
    /// A recognized label and how many times it was found
    Feature(String, u32),
    /// A word expanded from a label's hierarchy, aliases or relations
    Keyword(String),
    /// A named palette color, or `black-and-white`
    Color(String),
    /// The image's aspect class
    Orientation(Orientation),
}

/// Aspect class of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        };
        f.write_str(name)
    }
}
