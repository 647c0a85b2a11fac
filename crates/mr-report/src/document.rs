//! Assembled report documents.

use crate::layout::PlacedBlock;
use crate::snapshot::VisualizationSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Which report was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportVariant {
    /// Text-only report.
    Basic,
    /// Text plus embedded visualization snapshot.
    Detailed,
}

impl ReportVariant {
    /// File name stem, before the date suffix.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportVariant::Basic => "brain_tumor_analysis",
            ReportVariant::Detailed => "detailed_brain_tumor_analysis",
        }
    }

    /// Title line at the top of page 1.
    pub fn title(&self) -> &'static str {
        match self {
            ReportVariant::Basic => "Medical AI Diagnostics",
            ReportVariant::Detailed => "Comprehensive Medical Report",
        }
    }

    /// Subtitle line; also the PDF document title.
    pub fn subtitle(&self) -> &'static str {
        match self {
            ReportVariant::Basic => "Brain Tumor MRI Analysis Report",
            ReportVariant::Detailed => "Brain Tumor MRI Analysis with Visualizations",
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportVariant::Basic => write!(f, "basic"),
            ReportVariant::Detailed => write!(f, "detailed"),
        }
    }
}

/// The snapshot at its final position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedImage {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub snapshot: VisualizationSnapshot,
}

impl PlacedImage {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// One page of placed content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Text blocks in placement order.
    pub blocks: Vec<PlacedBlock>,
    /// Embedded image, detailed variant only.
    pub image: Option<PlacedImage>,
}

impl Page {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
            image: None,
        }
    }

    /// Bottom edge of the lowest flowed item, ignoring footer blocks.
    pub fn content_bottom(&self, flow_limit: f32) -> f32 {
        let text = self
            .blocks
            .iter()
            .filter(|b| b.top < flow_limit)
            .map(PlacedBlock::bottom);
        let image = self.image.iter().map(PlacedImage::bottom);
        text.chain(image).fold(0.0, f32::max)
    }
}

/// A fully laid-out report, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub variant: ReportVariant,
    pub title: String,
    /// Timestamp printed in the metadata block and used for the file name.
    pub generated_at: DateTime<Utc>,
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    /// `<stem>_<YYYY-MM-DD>.pdf`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.pdf",
            self.variant.file_stem(),
            self.generated_at.format("%Y-%m-%d")
        )
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text in reading order, one line per rendered line.
    pub fn text(&self) -> String {
        let mut out = Vec::new();
        for page in &self.pages {
            for block in &page.blocks {
                out.extend(block.block.lines.iter().map(|l| l.text.as_str()));
            }
        }
        out.join("\n")
    }

    /// The embedded snapshot, if any page carries one.
    pub fn embedded_image(&self) -> Option<&PlacedImage> {
        self.pages.iter().find_map(|p| p.image.as_ref())
    }
}
