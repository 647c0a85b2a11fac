//! Visualization snapshots and the capture boundary.
//!
//! Capturing the rendered visualization is the only suspending step of
//! report assembly. A [`SnapshotSource`] is awaited once; everything after
//! that is synchronous.

mod chart;

pub use chart::{ChartRegion, MAX_CHART_SCALE};

use crate::error::{ReportError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::debug;

/// A raster image of the rendered visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationSnapshot {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Encoded image bytes (PNG or JPEG).
    #[serde(skip)]
    pub image_data: Vec<u8>,
}

impl VisualizationSnapshot {
    pub fn new(pixel_width: u32, pixel_height: u32, image_data: Vec<u8>) -> Self {
        Self {
            pixel_width,
            pixel_height,
            image_data,
        }
    }

    /// Build a snapshot from encoded bytes, reading dimensions from the header.
    pub fn from_encoded(image_data: Vec<u8>) -> Result<Self> {
        let (pixel_width, pixel_height) = probe_dimensions(&image_data).ok_or_else(|| {
            ReportError::capture_unavailable("image header could not be read")
        })?;
        Ok(Self::new(pixel_width, pixel_height, image_data))
    }

    /// Height that keeps the aspect ratio at `width`.
    pub fn aspect_height(&self, width: f32) -> f32 {
        if self.pixel_width == 0 {
            return 0.0;
        }
        width * self.pixel_height as f32 / self.pixel_width as f32
    }

    fn ensure_rendered(&self) -> Result<()> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(ReportError::capture_unavailable("region has zero size"));
        }
        if self.image_data.is_empty() {
            return Err(ReportError::capture_unavailable("region has nothing rendered"));
        }
        Ok(())
    }
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Something that can be rasterized into a snapshot.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Capture the current rendering.
    async fn capture(&self) -> Result<VisualizationSnapshot>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// An already-rendered raster held in memory.
#[derive(Debug, Clone)]
pub struct RasterRegion {
    snapshot: VisualizationSnapshot,
}

impl RasterRegion {
    /// Region with declared dimensions. The bytes are not decoded here.
    pub fn new(pixel_width: u32, pixel_height: u32, image_data: Vec<u8>) -> Self {
        Self {
            snapshot: VisualizationSnapshot::new(pixel_width, pixel_height, image_data),
        }
    }

    /// Region with nothing rendered.
    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }

    /// Region from encoded image bytes.
    pub fn from_encoded(image_data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            snapshot: VisualizationSnapshot::from_encoded(image_data)?,
        })
    }
}

#[async_trait]
impl SnapshotSource for RasterRegion {
    async fn capture(&self) -> Result<VisualizationSnapshot> {
        self.snapshot.ensure_rendered()?;
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        format!(
            "raster {}x{}",
            self.snapshot.pixel_width, self.snapshot.pixel_height
        )
    }
}

/// An image file on disk, read at capture time.
#[derive(Debug, Clone)]
pub struct FileRegion {
    path: PathBuf,
}

impl FileRegion {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileRegion {
    async fn capture(&self) -> Result<VisualizationSnapshot> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ReportError::capture_unavailable(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        if bytes.is_empty() {
            return Err(ReportError::capture_unavailable(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        let snapshot = VisualizationSnapshot::from_encoded(bytes)?;
        debug!(
            path = %self.path.display(),
            width = snapshot.pixel_width,
            height = snapshot.pixel_height,
            "Read snapshot file"
        );
        snapshot.ensure_rendered()?;
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
