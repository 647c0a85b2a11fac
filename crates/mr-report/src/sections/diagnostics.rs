//! Diagnostic results: label, confidence, tier and severity.

use crate::layout::{ContentBlock, LayoutCursor, SectionPlacer, StyleHint};
use mr_common::{ClassificationResult, ConfidenceTier, Severity};

pub const HEADING: &str = "Diagnostic Results";

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSection {
    pub label: String,
    pub confidence: String,
    pub tier: ConfidenceTier,
    pub severity: Severity,
}

impl DiagnosticsSection {
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            label: result.label.clone(),
            confidence: result.confidence_display(),
            tier: result.tier(),
            severity: result.severity(),
        }
    }

    pub fn place(&self, placer: &mut SectionPlacer<'_>, cursor: LayoutCursor) -> LayoutCursor {
        let body = vec![
            placer.paragraph(&format!("Classification: {}", self.label), StyleHint::Result),
            placer.paragraph(
                &format!("Confidence Level: {}", self.confidence),
                StyleHint::Result,
            ),
            ContentBlock::paragraph(
                [format!("Confidence Assessment: {}", self.tier.label())],
                StyleHint::Confidence(self.tier),
            ),
            ContentBlock::paragraph(
                [format!("Severity Level: {}", self.severity)],
                StyleHint::Body,
            ),
        ];
        placer.place_section(cursor, HEADING, StyleHint::SectionHeading, body)
    }
}
