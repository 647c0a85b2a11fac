//! Report configuration types.
//!
//! All lengths are millimetres on the page. Defaults describe an A4 portrait
//! page with a 170 mm text column.

use crate::error::{ReportError, Result};
use crate::snapshot::MAX_CHART_SCALE;
use serde::{Deserialize, Serialize};

/// Fixed page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width.
    #[serde(default = "default_page_width")]
    pub width: f32,
    /// Page height.
    #[serde(default = "default_page_height")]
    pub height: f32,
    /// Left edge of the text column.
    #[serde(default = "default_margin_left")]
    pub margin_left: f32,
    /// Where the cursor resets on a new page.
    #[serde(default = "default_margin_top")]
    pub margin_top: f32,
    /// Width of the text column.
    #[serde(default = "default_content_width")]
    pub content_width: f32,
    /// Flowed content never extends below this line.
    #[serde(default = "default_page_height_limit")]
    pub page_height_limit: f32,
    /// Baseline of the first footer line.
    #[serde(default = "default_footer_baseline")]
    pub footer_baseline: f32,
}

fn default_page_width() -> f32 {
    210.0
}

fn default_page_height() -> f32 {
    297.0
}

fn default_margin_left() -> f32 {
    20.0
}

fn default_margin_top() -> f32 {
    20.0
}

fn default_content_width() -> f32 {
    170.0
}

fn default_page_height_limit() -> f32 {
    270.0
}

fn default_footer_baseline() -> f32 {
    280.0
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: default_page_width(),
            height: default_page_height(),
            margin_left: default_margin_left(),
            margin_top: default_margin_top(),
            content_width: default_content_width(),
            page_height_limit: default_page_height_limit(),
            footer_baseline: default_footer_baseline(),
        }
    }
}

impl PageGeometry {
    /// Vertical space available to flowed content on one page.
    pub fn usable_height(&self) -> f32 {
        self.page_height_limit - self.margin_top
    }

    /// Horizontal centre of the page.
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Vertical advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Advance per body, metadata or bullet line.
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Advance per heading line.
    #[serde(default = "default_heading_advance")]
    pub heading_advance: f32,
    /// Space inserted before a section unless it starts a page.
    #[serde(default = "default_section_gap")]
    pub section_gap: f32,
    /// Advance per footer line.
    #[serde(default = "default_footer_line_height")]
    pub footer_line_height: f32,
}

fn default_line_height() -> f32 {
    7.0
}

fn default_heading_advance() -> f32 {
    10.0
}

fn default_section_gap() -> f32 {
    8.0
}

fn default_footer_line_height() -> f32 {
    5.0
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            line_height: default_line_height(),
            heading_advance: default_heading_advance(),
            section_gap: default_section_gap(),
            footer_line_height: default_footer_line_height(),
        }
    }
}

/// Snapshot embedding and chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Width of the embedded image; height follows the aspect ratio.
    #[serde(default = "default_embed_width")]
    pub embed_width: f32,
    /// Pixel multiplier for the built-in chart raster.
    #[serde(default = "default_chart_scale")]
    pub chart_scale: u32,
}

fn default_embed_width() -> f32 {
    170.0
}

fn default_chart_scale() -> u32 {
    2
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            embed_width: default_embed_width(),
            chart_scale: default_chart_scale(),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Custom title for the basic report.
    pub title: Option<String>,
    /// Model description printed in the metadata block.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Page geometry.
    #[serde(default)]
    pub page: PageGeometry,
    /// Vertical spacing.
    #[serde(default)]
    pub spacing: Spacing,
    /// Snapshot embedding.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Deflate page content streams.
    #[serde(default = "default_true")]
    pub compress_streams: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_model_name() -> String {
    "CNN (Convolutional Neural Network)".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            model_name: default_model_name(),
            page: PageGeometry::default(),
            spacing: Spacing::default(),
            snapshot: SnapshotConfig::default(),
            compress_streams: true,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the basic report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the model description.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Set the snapshot embed width.
    pub fn with_embed_width(mut self, width: f32) -> Self {
        self.snapshot.embed_width = width;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress_streams = enabled;
        self
    }

    /// Check that the geometry leaves room to lay anything out.
    pub fn validate(&self) -> Result<()> {
        let page = &self.page;
        let spacing = &self.spacing;

        let positive = [
            ("page.width", page.width),
            ("page.height", page.height),
            ("page.content_width", page.content_width),
            ("spacing.line_height", spacing.line_height),
            ("spacing.heading_advance", spacing.heading_advance),
            ("spacing.footer_line_height", spacing.footer_line_height),
            ("snapshot.embed_width", self.snapshot.embed_width),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ReportError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(spacing.section_gap >= 0.0) {
            return Err(ReportError::InvalidConfig(
                "spacing.section_gap must not be negative".to_string(),
            ));
        }
        if page.margin_left + page.content_width > page.width {
            return Err(ReportError::InvalidConfig(
                "text column extends past the page edge".to_string(),
            ));
        }
        if page.page_height_limit > page.height {
            return Err(ReportError::InvalidConfig(
                "page_height_limit is below the page edge".to_string(),
            ));
        }
        // A heading plus one line must fit on a fresh page.
        if page.usable_height() < spacing.heading_advance + spacing.line_height {
            return Err(ReportError::InvalidConfig(format!(
                "usable page height {:.1} mm cannot hold a heading and one line",
                page.usable_height()
            )));
        }
        if !(1..=MAX_CHART_SCALE).contains(&self.snapshot.chart_scale) {
            return Err(ReportError::InvalidConfig(format!(
                "snapshot.chart_scale must be between 1 and {}",
                MAX_CHART_SCALE
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration from TOML.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
