//! Built-in chart rasterizer.
//!
//! Draws the confidence distribution and the per-class bar chart for one
//! result into a PNG. Geometry is expressed on a 400x200 grid and multiplied
//! by the configured scale.

use super::{SnapshotSource, VisualizationSnapshot};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use mr_common::{ClassificationResult, TumorClass};
use std::io::Cursor;
use tracing::debug;

const BASE_WIDTH: u32 = 400;
const BASE_HEIGHT: u32 = 200;

/// Largest accepted render scale (3200x1600 pixels).
pub const MAX_CHART_SCALE: u32 = 8;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TRACK: Rgb<u8> = Rgb([229, 231, 235]);
const AXIS: Rgb<u8> = Rgb([91, 33, 182]);
const UNKNOWN: Rgb<u8> = Rgb([107, 114, 128]);

/// Plot area of the bar chart, in grid units.
const PLOT_LEFT: f32 = 230.0;
const PLOT_RIGHT: f32 = 380.0;
const PLOT_TOP: f32 = 20.0;
const PLOT_BOTTOM: f32 = 180.0;

/// Renders the result charts on demand.
#[derive(Debug, Clone)]
pub struct ChartRegion {
    result: ClassificationResult,
    scale: u32,
}

impl ChartRegion {
    pub fn new(result: ClassificationResult, scale: u32) -> Self {
        Self { result, scale }
    }

    /// Pixel dimensions of the rendered chart, `None` on overflow.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((
            BASE_WIDTH.checked_mul(self.scale)?,
            BASE_HEIGHT.checked_mul(self.scale)?,
        ))
    }

    fn render(&self) -> Result<VisualizationSnapshot> {
        if self.scale == 0 {
            return Err(ReportError::capture_unavailable("chart scale is zero"));
        }
        if self.scale > MAX_CHART_SCALE {
            return Err(ReportError::capture_unavailable(format!(
                "chart scale {} exceeds {}",
                self.scale, MAX_CHART_SCALE
            )));
        }
        let (width, height) = self
            .dimensions()
            .ok_or_else(|| ReportError::capture_unavailable("chart dimensions overflow"))?;
        let mut canvas = Canvas {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
            scale: self.scale as f32,
        };

        let confidence = clamp_percent(self.result.confidence);
        let class = self.result.tumor_class();
        let class_color = class.map(|c| rgb(c.chart_color())).unwrap_or(UNKNOWN);

        // Distribution: detected class against everything else.
        canvas.fill(20.0, 80.0, 170.0, 120.0, TRACK);
        canvas.fill(20.0, 80.0, 20.0 + 150.0 * confidence / 100.0, 120.0, class_color);

        // Gauge in the tier colour.
        canvas.fill(20.0, 140.0, 170.0, 150.0, TRACK);
        let tier_color = rgb(self.result.tier().color());
        canvas.fill(20.0, 140.0, 20.0 + 150.0 * confidence / 100.0, 150.0, tier_color);

        // Bar chart gridlines at 25% steps.
        for step in 0..=4 {
            let y = PLOT_BOTTOM - (PLOT_BOTTOM - PLOT_TOP) * step as f32 / 4.0;
            canvas.fill(PLOT_LEFT, y - 0.5, PLOT_RIGHT, y + 0.5, TRACK);
        }

        let slots = TumorClass::all();
        let slot = (PLOT_RIGHT - PLOT_LEFT) / slots.len() as f32;
        for (i, candidate) in slots.iter().enumerate() {
            let value = if Some(*candidate) == class { confidence } else { 0.0 };
            if value <= 0.0 {
                continue;
            }
            let x0 = PLOT_LEFT + slot * i as f32 + (slot - 25.0) / 2.0;
            let top = PLOT_BOTTOM - (PLOT_BOTTOM - PLOT_TOP) * value / 100.0;
            canvas.fill(x0, top, x0 + 25.0, PLOT_BOTTOM, rgb(candidate.chart_color()));
        }

        canvas.fill(PLOT_LEFT, PLOT_TOP, PLOT_LEFT + 1.0, PLOT_BOTTOM, AXIS);
        canvas.fill(PLOT_LEFT, PLOT_BOTTOM, PLOT_RIGHT, PLOT_BOTTOM + 1.0, AXIS);

        let mut out = Cursor::new(Vec::new());
        canvas
            .img
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ReportError::capture_unavailable(format!("chart encoding failed: {}", e)))?;
        let data = out.into_inner();
        debug!(width, height, bytes = data.len(), "Rendered chart");
        Ok(VisualizationSnapshot::new(width, height, data))
    }
}

#[async_trait]
impl SnapshotSource for ChartRegion {
    async fn capture(&self) -> Result<VisualizationSnapshot> {
        self.render()
    }

    fn describe(&self) -> String {
        match self.dimensions() {
            Some((w, h)) => format!("chart {}x{} for {}", w, h, self.result.label),
            None => format!("chart at scale {} for {}", self.scale, self.result.label),
        }
    }
}

struct Canvas {
    img: RgbImage,
    scale: f32,
}

impl Canvas {
    /// Fill a rectangle given in grid units, clipped to the image.
    fn fill(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
        let (w, h) = self.img.dimensions();
        let px = |v: f32, max: u32| ((v * self.scale).round().max(0.0) as u32).min(max);
        let (x0, x1) = (px(x0, w), px(x1, w));
        let (y0, y1) = (px(y0, h), px(y1, h));
        for y in y0..y1 {
            for x in x0..x1 {
                self.img.put_pixel(x, y, color);
            }
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Rgb<u8> {
    Rgb([r, g, b])
}

fn clamp_percent(value: f64) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chart_dimensions_follow_scale() {
        let region = ChartRegion::new(ClassificationResult::new("Glioma", 92.0), 2);
        let snap = region.capture().await.unwrap();
        assert_eq!((snap.pixel_width, snap.pixel_height), (800, 400));
        assert!(snap.image_data.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn test_chart_uses_class_colour() {
        let region = ChartRegion::new(ClassificationResult::new("Meningioma", 100.0), 1);
        let snap = region.capture().await.unwrap();
        let img = image::load_from_memory(&snap.image_data).unwrap().to_rgb8();
        // Inside the distribution bar.
        assert_eq!(img.get_pixel(100, 100), &Rgb([0xdc, 0x26, 0x26]));
    }

    #[tokio::test]
    async fn test_unknown_label_still_renders() {
        let region = ChartRegion::new(ClassificationResult::new("Chordoma", f64::NAN), 1);
        let snap = region.capture().await.unwrap();
        assert_eq!(snap.pixel_width, 400);
    }

    #[tokio::test]
    async fn test_zero_scale_unavailable() {
        let region = ChartRegion::new(ClassificationResult::new("Glioma", 50.0), 0);
        assert!(matches!(
            region.capture().await,
            Err(ReportError::CaptureUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_oversized_scale_unavailable() {
        let result = ClassificationResult::new("Glioma", 50.0);
        let huge = ChartRegion::new(result.clone(), 20_000_000);
        assert_eq!(huge.dimensions(), None);
        assert!(huge.describe().contains("scale 20000000"));
        assert!(matches!(
            huge.capture().await,
            Err(ReportError::CaptureUnavailable { .. })
        ));

        let large = ChartRegion::new(result, MAX_CHART_SCALE + 1);
        assert!(large.dimensions().is_some());
        assert!(matches!(
            large.capture().await,
            Err(ReportError::CaptureUnavailable { .. })
        ));
    }
}
