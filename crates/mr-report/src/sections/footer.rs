//! Footer disclaimer stamped on every page.

use crate::config::{PageGeometry, Spacing};
use crate::document::{Page, ReportVariant};
use crate::layout::{Align, ContentBlock, PlacedBlock, StyleHint, BASELINE_RATIO};

const CLINICAL_USE: &str =
    "For clinical use only - Review by qualified medical professionals required";

/// Disclaimer lines plus the page marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterTemplate {
    pub disclaimer: [&'static str; 2],
}

impl FooterTemplate {
    pub fn for_variant(variant: ReportVariant) -> Self {
        let origin = match variant {
            ReportVariant::Basic => "This report is generated by Medical AI Diagnostics System",
            ReportVariant::Detailed => "Generated by Medical AI Diagnostics System",
        };
        Self {
            disclaimer: [origin, CLINICAL_USE],
        }
    }

    /// Lines for page `number` of `total`.
    pub fn lines(&self, number: u32, total: usize) -> Vec<String> {
        let mut lines: Vec<String> = self.disclaimer.iter().map(|s| s.to_string()).collect();
        lines.push(format!("Page {} of {}", number, total));
        lines
    }

    /// Append the footer to every page. Runs once the page count is final.
    pub fn stamp(&self, pages: &mut [Page], geometry: &PageGeometry, spacing: &Spacing) {
        let total = pages.len();
        let line_height = spacing.footer_line_height;
        for page in pages.iter_mut() {
            page.blocks.push(PlacedBlock {
                x: geometry.center_x(),
                top: geometry.footer_baseline - BASELINE_RATIO * line_height,
                align: Align::Center,
                line_height,
                block: ContentBlock::paragraph(self.lines(page.number, total), StyleHint::Footer),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_on_every_page() {
        let geometry = PageGeometry::default();
        let spacing = Spacing::default();
        let mut pages = vec![Page::new(1), Page::new(2)];
        FooterTemplate::for_variant(ReportVariant::Basic).stamp(&mut pages, &geometry, &spacing);

        for page in &pages {
            let footer = page.blocks.last().unwrap();
            let baselines: Vec<f32> = footer.baselines().map(|(y, _)| y).collect();
            assert!((baselines[0] - 280.0).abs() < 1e-4);
            assert!((baselines[1] - 285.0).abs() < 1e-4);
            assert!(footer.top > geometry.page_height_limit);
        }
        assert_eq!(pages[1].blocks[0].block.lines[2].text, "Page 2 of 2");
    }
}
