//! Description, recommendation and assessment.

use crate::content::{Narrative, ResolvedContent};
use crate::document::ReportVariant;
use crate::layout::{LayoutCursor, SectionPlacer, StyleHint};

/// Section headings for one narrative depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Headings {
    description: &'static str,
    recommendation: &'static str,
    assessment: &'static str,
}

const BRIEF: Headings = Headings {
    description: "Tumor Analysis",
    recommendation: "Clinical Recommendations",
    assessment: "Medical Analysis Summary",
};

const COMPREHENSIVE: Headings = Headings {
    description: "Medical Analysis & Recommendations",
    recommendation: "Clinical Recommendations",
    assessment: "Clinical Assessment",
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSection {
    pub narrative: Narrative,
    pub content: ResolvedContent,
}

impl AnalysisSection {
    pub fn new(content: ResolvedContent, narrative: Narrative) -> Self {
        Self { narrative, content }
    }

    /// Narrative depth used by a report variant.
    pub fn narrative_for(variant: ReportVariant) -> Narrative {
        match variant {
            ReportVariant::Basic => Narrative::Brief,
            ReportVariant::Detailed => Narrative::Comprehensive,
        }
    }

    pub fn place(&self, placer: &mut SectionPlacer<'_>, cursor: LayoutCursor) -> LayoutCursor {
        let (headings, lead_style) = match self.narrative {
            Narrative::Brief => (BRIEF, StyleHint::SubHeading),
            Narrative::Comprehensive => (COMPREHENSIVE, StyleHint::SectionHeading),
        };

        let description = placer.paragraph(self.content.description, StyleHint::Body);
        let cursor = placer.place_section(cursor, headings.description, lead_style, vec![description]);

        let recommendation = placer.paragraph(self.content.recommendation, StyleHint::Body);
        let cursor = placer.place_section(
            cursor,
            headings.recommendation,
            StyleHint::SubHeading,
            vec![recommendation],
        );

        let bullets = placer.bullets(self.content.assessment);
        placer.place_section(cursor, headings.assessment, StyleHint::SubHeading, vec![bullets])
    }
}
