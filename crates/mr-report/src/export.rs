//! PDF serialization.
//!
//! Pages are written with the standard Helvetica faces, so no font data is
//! embedded. Page geometry is converted from millimetres (origin top-left)
//! to points (origin bottom-left). The snapshot is decoded and re-encoded as
//! a Flate-compressed RGB XObject, with an SMask when it carries alpha.
//!
//! Export is all-or-nothing: the snapshot is decoded before anything is
//! written, and a failure yields `DocumentExportFailed` with no bytes.

use crate::config::ReportConfig;
use crate::document::{Page, ReportDocument, ReportVariant};
use crate::error::{ReportError, Result};
use crate::layout::Align;
use crate::snapshot::VisualizationSnapshot;
use crate::text::{encode_win_ansi, FontFace, MM_PER_PT};
use chrono::{Datelike, Timelike};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const IMAGE_NAME: &[u8] = b"Im1";
const COMPRESSION_LEVEL: u8 = 6;

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// A serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedReport {
    pub file_name: String,
    pub variant: ReportVariant,
    pub pages: usize,
    pub byte_len: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ExportedReport {
    /// Write the artifact into `dir`, creating it if needed.
    ///
    /// Bytes go to a `.part` file that is renamed into place, so a failed
    /// write never leaves a truncated PDF under the final name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        let partial = dir.join(format!("{}.part", self.file_name));
        std::fs::write(&partial, &self.bytes)?;
        std::fs::rename(&partial, &path)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "Report written");
        Ok(path)
    }
}

/// Decoded snapshot ready to embed.
struct RasterPayload {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl RasterPayload {
    fn decode(snapshot: &VisualizationSnapshot) -> Result<Self> {
        let decoded = image::ImageReader::new(Cursor::new(&snapshot.image_data))
            .with_guessed_format()
            .map_err(|e| ReportError::export_failed(format!("snapshot unreadable: {}", e)))?
            .decode()
            .map_err(|e| ReportError::export_failed(format!("snapshot decode failed: {}", e)))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ReportError::export_failed("snapshot has no pixels"));
        }
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let rgb = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }
}

/// Serializes a [`ReportDocument`] to PDF bytes.
pub struct PdfExporter<'a> {
    config: &'a ReportConfig,
}

impl<'a> PdfExporter<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Serialize the document. Identical documents give identical bytes.
    pub fn export(&self, doc: &ReportDocument) -> Result<ExportedReport> {
        let raster = doc
            .embedded_image()
            .map(|img| RasterPayload::decode(&img.snapshot))
            .transpose()?;

        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let tree_id = alloc();
        let info_id = alloc();
        let fonts: Vec<(FontFace, Ref)> = FontFace::all().into_iter().map(|f| (f, alloc())).collect();
        let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc(), alloc())).collect();
        let image_id = raster.as_ref().map(|_| alloc());
        let mask_id = raster
            .as_ref()
            .and_then(|r| r.alpha.as_ref())
            .map(|_| alloc());

        let page_width = pt(doc.page_width);
        let page_height = pt(doc.page_height);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(doc.pages.len() as i32);

        for (face, id) in &fonts {
            pdf.type1_font(*id)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (page, (page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
            {
                let mut writer = pdf.page(*page_id);
                writer
                    .media_box(Rect::new(0.0, 0.0, page_width, page_height))
                    .parent(tree_id)
                    .contents(*content_id);
                let mut resources = writer.resources();
                {
                    let mut dict = resources.fonts();
                    for (face, id) in &fonts {
                        dict.pair(Name(face.resource_name().as_bytes()), *id);
                    }
                }
                if let (Some(id), Some(_)) = (image_id, page.image.as_ref()) {
                    resources.x_objects().pair(Name(IMAGE_NAME), id);
                }
                resources.finish();
                writer.finish();
            }

            let content = self.page_content(page, page_height);
            if self.config.compress_streams {
                let compressed = compress_to_vec_zlib(&content, COMPRESSION_LEVEL);
                pdf.stream(*content_id, &compressed).filter(Filter::FlateDecode);
            } else {
                pdf.stream(*content_id, &content);
            }
        }

        if let (Some(raster), Some(image_id)) = (&raster, image_id) {
            if let (Some(alpha), Some(mask_id)) = (&raster.alpha, mask_id) {
                let compressed = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
                let mut mask = pdf.image_xobject(mask_id, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(raster.width as i32);
                mask.height(raster.height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
            }
            let compressed = compress_to_vec_zlib(&raster.rgb, COMPRESSION_LEVEL);
            let mut xobj = pdf.image_xobject(image_id, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(raster.width as i32);
            xobj.height(raster.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_id) = mask_id {
                xobj.s_mask(mask_id);
            }
        }

        let at = doc.generated_at;
        let creation_date = Date::new(at.year().clamp(0, i32::from(u16::MAX)) as u16)
            .month(at.month() as u8)
            .day(at.day() as u8)
            .hour(at.hour() as u8)
            .minute(at.minute() as u8)
            .second(at.second() as u8);
        pdf.document_info(info_id)
            .title(TextStr(&doc.title))
            .creator(TextStr("Medical AI Diagnostics System"))
            .producer(TextStr(concat!("mr-report ", env!("CARGO_PKG_VERSION"))))
            .creation_date(creation_date);

        let bytes = pdf.finish();
        let exported = ExportedReport {
            file_name: doc.file_name(),
            variant: doc.variant,
            pages: doc.page_count(),
            byte_len: bytes.len(),
            bytes,
        };

        info!(
            variant = %exported.variant,
            pages = exported.pages,
            bytes = exported.byte_len,
            file_name = %exported.file_name,
            "Report exported"
        );
        Ok(exported)
    }

    fn page_content(&self, page: &Page, page_height: f32) -> Vec<u8> {
        let mut content = Content::new();

        for placed in &page.blocks {
            let style = placed.block.style;
            let metrics = style.metrics();
            let (r, g, b) = style.color();
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

            for (baseline, line) in placed.baselines() {
                if line.text.is_empty() {
                    continue;
                }
                let x = match placed.align {
                    Align::Left => placed.x + line.indent,
                    Align::Center => placed.x - metrics.width(&line.text) / 2.0,
                };
                content.begin_text();
                content.set_font(Name(style.face().resource_name().as_bytes()), style.size_pt());
                content.next_line(pt(x), page_height - pt(baseline));
                content.show(Str(&encode_win_ansi(&line.text)));
                content.end_text();
            }
        }

        if let Some(image) = &page.image {
            content.save_state();
            content.transform([
                pt(image.width),
                0.0,
                0.0,
                pt(image.height),
                pt(image.x),
                page_height - pt(image.bottom()),
            ]);
            content.x_object(Name(IMAGE_NAME));
            content.restore_state();
        }

        content.finish()
    }
}
