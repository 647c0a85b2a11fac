//! End-to-end report scenarios: result in, PDF bytes out.

use chrono::{DateTime, TimeZone, Utc};
use mr_common::ClassificationResult;
use mr_report::{
    ChartRegion, FileRegion, RasterRegion, ReportConfig, ReportError, ReportGenerator,
    ReportVariant, SnapshotSource,
};

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 15, 0).unwrap()
}

fn uncompressed() -> ReportGenerator {
    ReportGenerator::new(ReportConfig::default().with_compression(false))
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

mod basic {
    use super::*;

    #[test]
    fn test_high_confidence_tumor() {
        let generator = uncompressed();
        let result = ClassificationResult::new("Glioma", 92.0);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let text = doc.text();

        assert!(text.contains("Classification: Glioma"));
        assert!(text.contains("Confidence Level: 92%"));
        assert!(text.contains("High Confidence"));
        assert!(text.contains("Immediate consultation with a neurosurgeon"));
        assert!(text.contains("Gliomas are the most"));

        let exported = generator.export(&doc).unwrap();
        assert!(exported.bytes.starts_with(b"%PDF"));
        assert_eq!(exported.file_name, "brain_tumor_analysis_2026-10-18.pdf");
        assert_eq!(exported.pages, doc.page_count());
        assert!(contains(&exported.bytes, "Classification: Glioma"));
        assert!(contains(&exported.bytes, "Helvetica-Bold"));
    }

    #[test]
    fn test_absence_with_low_confidence() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("No Tumor", 55.0);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let text = doc.text();

        assert!(text.contains("Low Confidence"));
        assert!(text.contains("Severity Level: Normal"));
        assert!(text.contains("Continue with routine monitoring"));
        assert!(text.contains("Analysis indicates healthy brain tissue with no tumor detected"));
        assert!(!text.contains("Immediate consultation"));
    }

    #[test]
    fn test_absence_with_high_confidence() {
        let generator = uncompressed();
        let result = ClassificationResult::new("No Tumor", 92.0);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let text = doc.text();

        assert!(text.contains("Classification: No Tumor"));
        assert!(text.contains("Confidence Level: 92%"));
        assert!(text.contains("Confidence Assessment: High Confidence"));
        assert!(text.contains("Severity Level: Normal"));
        assert!(text.contains("Analysis indicates healthy brain tissue with no tumor detected"));
        assert!(text.contains("Continue with routine monitoring"));
        assert!(!text.contains("Immediate consultation"));

        let exported = generator.export(&doc).unwrap();
        assert!(contains(&exported.bytes, "Classification: No Tumor"));
    }

    #[test]
    fn test_tumor_with_low_confidence() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 55.0);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let text = doc.text();

        assert!(text.contains("Classification: Glioma"));
        assert!(text.contains("Confidence Level: 55%"));
        assert!(text.contains("Confidence Assessment: Low Confidence"));
        assert!(!text.contains("Severity Level: Normal"));
        assert!(text.contains("Immediate consultation with a neurosurgeon"));
        assert!(!text.contains("Continue with routine monitoring"));
    }

    #[test]
    fn test_unknown_label_uses_fallbacks() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Ependymoma", 81.0);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        assert!(doc.text().to_lowercase().contains("further analysis"));
        assert!(generator.export(&doc).is_ok());
    }

    #[test]
    fn test_no_result() {
        let generator = ReportGenerator::default_config();
        assert!(matches!(
            generator.export_basic_report(None),
            Err(ReportError::NoResultAvailable)
        ));
    }

    #[test]
    fn test_every_page_has_footer() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Pituitary", 64.5);
        let doc = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let total = doc.page_count();
        assert!(total >= 1);
        for page in &doc.pages {
            let marker = format!("Page {} of {}", page.number, total);
            assert!(page.blocks.iter().any(|b| b.block.text().contains(&marker)));
        }
    }

    #[test]
    fn test_export_is_deterministic() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Meningioma", 77.7);
        let a = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        let b = generator
            .generate_basic_report_at(Some(&result), at())
            .unwrap();
        assert_eq!(
            generator.export(&a).unwrap().bytes,
            generator.export(&b).unwrap().bytes
        );
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let exported = generator.export_basic_report(Some(&result)).unwrap();
        let path = exported.write_to_dir(&dir.path().join("out")).unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(exported.file_name.as_str())
        );
        assert_eq!(std::fs::read(&path).unwrap(), exported.bytes);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }
}

mod detailed {
    use super::*;

    #[tokio::test]
    async fn test_embeds_snapshot_at_aspect_ratio() {
        let generator = uncompressed();
        let result = ClassificationResult::new("Meningioma", 70.0);
        let chart = ChartRegion::new(result.clone(), 2);
        let snapshot = chart.capture().await.unwrap();
        let region = RasterRegion::new(800, 400, snapshot.image_data);

        let doc = generator
            .generate_detailed_report_at(Some(&result), Some(&region), at())
            .await
            .unwrap();
        assert_eq!(doc.variant, ReportVariant::Detailed);
        assert!(doc.text().contains("Medium Confidence"));
        assert!(doc.text().contains("Visualization Charts"));

        let image = doc.embedded_image().unwrap();
        assert!((image.width - 170.0).abs() < 1e-3);
        assert!((image.height - 85.0).abs() < 1e-3);
        assert!(image.bottom() <= 270.0);

        let exported = generator.export(&doc).unwrap();
        assert!(exported.bytes.starts_with(b"%PDF"));
        assert_eq!(
            exported.file_name,
            "detailed_brain_tumor_analysis_2026-10-18.pdf"
        );
        assert!(contains(&exported.bytes, "/Im1"));
    }

    #[tokio::test]
    async fn test_chart_region_end_to_end() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let chart = ChartRegion::new(result.clone(), 2);
        let exported = generator
            .export_detailed_report(Some(&result), Some(&chart))
            .await
            .unwrap();
        assert!(exported.pages >= 1);
        assert!(exported.file_name.starts_with("detailed_brain_tumor_analysis_"));
    }

    #[tokio::test]
    async fn test_empty_region_aborts() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let region = RasterRegion::empty();
        let err = generator
            .generate_detailed_report(Some(&result), Some(&region))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::CaptureUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_region_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Pituitary", 88.0);
        let region = FileRegion::new(dir.path().join("nothing.png"));
        let err = generator
            .export_detailed_report(Some(&result), Some(&region))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "capture_unavailable");
    }

    #[tokio::test]
    async fn test_corrupt_image_fails_export() {
        let generator = ReportGenerator::default_config();
        let result = ClassificationResult::new("Glioma", 92.0);
        let region = RasterRegion::new(640, 480, b"definitely not a png".to_vec());

        let doc = generator
            .generate_detailed_report_at(Some(&result), Some(&region), at())
            .await
            .unwrap();
        let err = generator.export(&doc).unwrap_err();
        assert!(matches!(err, ReportError::DocumentExportFailed { .. }));
    }

    #[tokio::test]
    async fn test_no_result_before_capture() {
        let generator = ReportGenerator::default_config();
        let region = RasterRegion::empty();
        let err = generator
            .export_detailed_report(None, Some(&region))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NoResultAvailable));
    }
}
