//! PDF report generator for MRI classification results.
//!
//! Turns a classification result (diagnostic label plus confidence) into a
//! paginated, print-ready PDF.
//!
//! # Variants
//!
//! - **Basic**: text only. Header, diagnostic results, description,
//!   recommendation, assessment bullets, technical details, footer.
//! - **Detailed**: the same front matter plus an embedded visualization
//!   snapshot, followed by the comprehensive narrative.
//!
//! # Pipeline
//!
//! - [`content`]: label to description, recommendation and assessment
//! - [`text`]: width measurement and word wrap
//! - [`layout`]: cursor, blocks and page-break placement
//! - [`snapshot`]: capture sources (in-memory raster, file, built-in chart)
//! - [`generator`]: section order and document assembly
//! - [`export`]: PDF serialization
//!
//! # Example
//!
//! ```no_run
//! use mr_common::ClassificationResult;
//! use mr_report::{ReportConfig, ReportGenerator};
//!
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let result = ClassificationResult::new("Glioma", 92.0);
//! let exported = generator.export_basic_report(Some(&result)).unwrap();
//! exported.write_to_dir(std::path::Path::new("reports")).unwrap();
//! ```

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod export;
pub mod generator;
pub mod layout;
pub mod sections;
pub mod snapshot;
pub mod text;

pub use config::{PageGeometry, ReportConfig, SnapshotConfig, Spacing};
pub use content::{
    resolve_assessment, resolve_description, resolve_recommendation, Narrative, ResolvedContent,
};
pub use document::{Page, PlacedImage, ReportDocument, ReportVariant};
pub use error::{ReportError, Result};
pub use export::{ExportedReport, PdfExporter};
pub use generator::ReportGenerator;
pub use layout::{ContentBlock, LayoutCursor, SectionPlacer, StyleHint};
pub use snapshot::{ChartRegion, FileRegion, RasterRegion, SnapshotSource, VisualizationSnapshot};
pub use text::{wrap, TextMetrics};
