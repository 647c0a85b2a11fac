//! Fixed technical details.

use crate::layout::{LayoutCursor, SectionPlacer, StyleHint};
use mr_common::TIER_THRESHOLDS;

pub const HEADING: &str = "Technical Analysis Details";

/// Technical details bullets; identical for every result.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalSection {
    pub items: Vec<String>,
}

impl Default for TechnicalSection {
    fn default() -> Self {
        Self {
            items: vec![
                "AI Model: Convolutional Neural Network (CNN)".to_string(),
                "Input Resolution: 150x150 pixels".to_string(),
                "Analysis Time: Real-time processing".to_string(),
                "Clinical Grade: FDA-compliant algorithm".to_string(),
                format!(
                    "Confidence Threshold: {}% minimum for clinical consideration",
                    TIER_THRESHOLDS.medium
                ),
            ],
        }
    }
}

impl TechnicalSection {
    pub fn place(&self, placer: &mut SectionPlacer<'_>, cursor: LayoutCursor) -> LayoutCursor {
        let bullets = placer.bullets(self.items.as_slice());
        placer.place_section(cursor, HEADING, StyleHint::SubHeading, vec![bullets])
    }
}
