//! Report assembly.
//!
//! A generator call owns its cursor and document from start to finish. The
//! detailed report awaits its snapshot exactly once, before any layout.

use crate::config::ReportConfig;
use crate::content::{Narrative, ResolvedContent};
use crate::document::{ReportDocument, ReportVariant};
use crate::error::{ReportError, Result};
use crate::export::{ExportedReport, PdfExporter};
use crate::layout::{LayoutCursor, SectionPlacer};
use crate::sections::*;
use crate::snapshot::{SnapshotSource, VisualizationSnapshot};

use chrono::{DateTime, Utc};
use mr_common::ClassificationResult;
use tracing::{debug, info};

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assemble the text-only report, stamped with the current time.
    pub fn generate_basic_report(
        &self,
        result: Option<&ClassificationResult>,
    ) -> Result<ReportDocument> {
        self.generate_basic_report_at(result, Utc::now())
    }

    /// Assemble the text-only report at a fixed timestamp.
    pub fn generate_basic_report_at(
        &self,
        result: Option<&ClassificationResult>,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportDocument> {
        let result = result.ok_or(ReportError::NoResultAvailable)?;
        self.config.validate()?;
        let variant = ReportVariant::Basic;
        debug!(label = %result.label, confidence = result.confidence, %variant, "Generating report");

        let mut placer = SectionPlacer::new(&self.config.page, &self.config.spacing);
        let cursor = placer.start();
        let cursor = self.place_front_matter(&mut placer, cursor, variant, result, generated_at);
        let cursor = self.place_analysis(&mut placer, cursor, variant, result);
        let cursor = TechnicalSection::default().place(&mut placer, cursor);

        Ok(self.finish(placer, cursor, variant, generated_at))
    }

    /// Assemble the report with the visualization snapshot embedded.
    pub async fn generate_detailed_report(
        &self,
        result: Option<&ClassificationResult>,
        region: Option<&dyn SnapshotSource>,
    ) -> Result<ReportDocument> {
        self.generate_detailed_report_at(result, region, Utc::now())
            .await
    }

    /// Detailed report at a fixed timestamp.
    ///
    /// The result is checked before the region is touched; a capture
    /// failure aborts before any layout.
    pub async fn generate_detailed_report_at(
        &self,
        result: Option<&ClassificationResult>,
        region: Option<&dyn SnapshotSource>,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportDocument> {
        let result = result.ok_or(ReportError::NoResultAvailable)?;
        self.config.validate()?;
        let region = region
            .ok_or_else(|| ReportError::capture_unavailable("no visualization region provided"))?;

        debug!(source = %region.describe(), "Capturing visualization");
        let snapshot = region.capture().await?;
        self.layout_detailed(result, snapshot, generated_at)
    }

    fn layout_detailed(
        &self,
        result: &ClassificationResult,
        snapshot: VisualizationSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportDocument> {
        let variant = ReportVariant::Detailed;
        debug!(label = %result.label, confidence = result.confidence, %variant, "Generating report");

        let mut placer = SectionPlacer::new(&self.config.page, &self.config.spacing);
        let cursor = placer.start();
        let cursor = self.place_front_matter(&mut placer, cursor, variant, result, generated_at);
        let cursor = VisualizationSection::new(snapshot, self.config.snapshot.embed_width)
            .place(&mut placer, cursor);
        let cursor = self.place_analysis(&mut placer, cursor, variant, result);

        Ok(self.finish(placer, cursor, variant, generated_at))
    }

    /// Serialize a document to PDF.
    pub fn export(&self, document: &ReportDocument) -> Result<ExportedReport> {
        PdfExporter::new(&self.config).export(document)
    }

    /// Generate and export the basic report.
    pub fn export_basic_report(
        &self,
        result: Option<&ClassificationResult>,
    ) -> Result<ExportedReport> {
        let document = self.generate_basic_report(result)?;
        self.export(&document)
    }

    /// Generate and export the detailed report.
    pub async fn export_detailed_report(
        &self,
        result: Option<&ClassificationResult>,
        region: Option<&dyn SnapshotSource>,
    ) -> Result<ExportedReport> {
        let document = self.generate_detailed_report(result, region).await?;
        self.export(&document)
    }

    fn place_front_matter(
        &self,
        placer: &mut SectionPlacer<'_>,
        cursor: LayoutCursor,
        variant: ReportVariant,
        result: &ClassificationResult,
        generated_at: DateTime<Utc>,
    ) -> LayoutCursor {
        let title = match variant {
            ReportVariant::Basic => self.config.title.as_deref(),
            ReportVariant::Detailed => None,
        };
        let header = HeaderSection::new(variant, title, &self.config.model_name, generated_at);
        let cursor = header.place(placer, cursor);
        DiagnosticsSection::from_result(result).place(placer, cursor)
    }

    fn place_analysis(
        &self,
        placer: &mut SectionPlacer<'_>,
        cursor: LayoutCursor,
        variant: ReportVariant,
        result: &ClassificationResult,
    ) -> LayoutCursor {
        let narrative: Narrative = AnalysisSection::narrative_for(variant);
        AnalysisSection::new(ResolvedContent::resolve(result, narrative), narrative)
            .place(placer, cursor)
    }

    fn finish(
        &self,
        placer: SectionPlacer<'_>,
        cursor: LayoutCursor,
        variant: ReportVariant,
        generated_at: DateTime<Utc>,
    ) -> ReportDocument {
        let mut pages = placer.into_pages();
        FooterTemplate::for_variant(variant).stamp(
            &mut pages,
            &self.config.page,
            &self.config.spacing,
        );

        let document = ReportDocument {
            variant,
            title: variant.subtitle().to_string(),
            generated_at,
            page_width: self.config.page.width,
            page_height: self.config.page.height,
            pages,
        };
        info!(
            %variant,
            pages = document.page_count(),
            final_y = cursor.y,
            file_name = %document.file_name(),
            "Report generated"
        );
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StyleHint;
    use crate::snapshot::RasterRegion;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_report_generator_default() {
        let generator = ReportGenerator::default_config();
        assert!(generator.config().compress_streams);
    }

    #[test]
    fn test_basic_requires_result() {
        let generator = ReportGenerator::default_config();
        let err = generator.generate_basic_report(None).unwrap_err();
        assert!(matches!(err, ReportError::NoResultAvailable));
    }

    #[test]
    fn test_basic_section_order() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let doc = generator.generate_basic_report_at(Some(&result), at()).unwrap();
        let text = doc.text();

        let order = [
            "Medical AI Diagnostics",
            "Diagnostic Results",
            "Classification: Glioma",
            "Confidence Level: 92%",
            "Confidence Assessment: High Confidence",
            "Tumor Analysis",
            "Clinical Recommendations",
            "Medical Analysis Summary",
            "Technical Analysis Details",
            "For clinical use only",
        ];
        let mut last = 0;
        for needle in order {
            let pos = text[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {}", needle));
            last += pos;
        }
        assert_eq!(doc.file_name(), "brain_tumor_analysis_2026-10-18.pdf");
        assert!(doc.embedded_image().is_none());
    }

    #[test]
    fn test_tier_line_is_coloured() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Meningioma", 70.0);
        let doc = generator.generate_basic_report_at(Some(&result), at()).unwrap();
        let tier_block = doc.pages[0]
            .blocks
            .iter()
            .find(|b| b.block.text().starts_with("Confidence Assessment"))
            .unwrap();
        assert_eq!(tier_block.block.style, StyleHint::Confidence(result.tier()));
        assert_eq!(tier_block.block.style.color(), (0xf5, 0x9e, 0x0b));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ReportConfig::default();
        config.spacing.line_height = -1.0;
        let generator = ReportGenerator::new(config);
        let result = ClassificationResult::new("Glioma", 92.0);
        assert!(matches!(
            generator.generate_basic_report(Some(&result)),
            Err(ReportError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_detailed_checks_result_before_capture() {
        let generator = ReportGenerator::default_config();
        let region = RasterRegion::empty();
        let err = generator
            .generate_detailed_report(None, Some(&region))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NoResultAvailable));
    }

    #[tokio::test]
    async fn test_detailed_without_region() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let err = generator
            .generate_detailed_report(Some(&result), None)
            .await
            .unwrap_err();
        assert_eq!(err.category(), "capture_unavailable");
    }
}
