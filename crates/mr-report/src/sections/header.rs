//! Title, subtitle and metadata block.

use crate::document::ReportVariant;
use crate::layout::{Align, ContentBlock, LayoutCursor, SectionPlacer, StyleHint};
use chrono::{DateTime, Utc};

/// Header section at the top of page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSection {
    pub title: String,
    pub subtitle: String,
    pub metadata: Vec<String>,
}

impl HeaderSection {
    /// Header for `variant`. `title` overrides the variant's title line.
    pub fn new(
        variant: ReportVariant,
        title: Option<&str>,
        model_name: &str,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.unwrap_or(variant.title()).to_string(),
            subtitle: variant.subtitle().to_string(),
            metadata: vec![
                format!("Report Date: {}", generated_at.format("%Y-%m-%d")),
                format!("Analysis Time: {} UTC", generated_at.format("%H:%M:%S")),
                format!("AI Model: {}", model_name),
            ],
        }
    }

    pub fn place(&self, placer: &mut SectionPlacer<'_>, cursor: LayoutCursor) -> LayoutCursor {
        let cursor = placer.place_lines(
            cursor,
            ContentBlock::heading(&self.title, StyleHint::Title),
            Align::Center,
        );
        let cursor = placer.place_lines(
            cursor,
            ContentBlock::heading(&self.subtitle, StyleHint::Subtitle),
            Align::Center,
        );
        let metadata = ContentBlock::paragraph(self.metadata.iter().cloned(), StyleHint::Metadata);
        placer.place_spaced(cursor, metadata, Align::Left)
    }
}
