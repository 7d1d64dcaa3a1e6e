//! Turning fused labels, palette colors and image size into tags.

use crate::color::PaletteEntry;
use crate::config::TaggingConfig;
use crate::fusion::FusedLabel;
use crate::taxonomy::Label;
use crate::types::{Tag, TagReport};

use super::colors::color_tags;
use super::keywords::KeywordExpander;
use super::orientation::orientation;

/// Builds the final [`TagReport`] for one image.
pub struct TagSynthesizer {
    config: TaggingConfig,
    keywords: KeywordExpander,
}

impl TagSynthesizer {
    pub fn new(config: TaggingConfig) -> Self {
        let keywords = KeywordExpander::new(&config.extra_stopwords);
        Self { config, keywords }
    }

    /// Tags in kind order: one feature per distinct label (first-seen order,
    /// with its count), then keywords, then colors, then orientation.
    pub fn synthesize(
        &self,
        fused: &[FusedLabel],
        palette: &[PaletteEntry],
        width: u32,
        height: u32,
    ) -> TagReport {
        let groups = group_labels(fused);
        let mut tags: Vec<Tag> = groups
            .iter()
            .map(|(label, count)| Tag::Feature(label.name().to_string(), *count))
            .collect();

        if self.config.include_keywords {
            let keywords = self.keywords.expand(groups.iter().map(|(l, _)| *l));
            tags.extend(keywords.into_iter().map(Tag::Keyword));
        }

        if self.config.include_colors {
            tags.extend(color_tags(palette).into_iter().map(Tag::Color));
        }

        let orientation = orientation(width, height, self.config.orientation_tolerance);
        tags.push(Tag::Orientation(orientation));

        tracing::debug!(
            "Synthesized {} tags from {} labels ({} distinct)",
            tags.len(),
            fused.len(),
            groups.len()
        );

        TagReport {
            width,
            height,
            orientation,
            tags,
        }
    }
}

/// Distinct labels with their occurrence counts, in first-seen order.
fn group_labels(fused: &[FusedLabel]) -> Vec<(&Label, u32)> {
    let mut groups: Vec<(&Label, u32)> = Vec::new();
    for f in fused {
        match groups.iter_mut().find(|(label, _)| *label == &f.label) {
            Some((_, count)) => *count += 1,
            None => groups.push((&f.label, 1)),
        }
    }
    groups
}
