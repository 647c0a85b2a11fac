//! Positioned layout: cursor, content blocks and the section placer.
//!
//! Coordinates are millimetres from the top-left corner of the page. The
//! cursor's `y` is the top of the free space on the current page; a text
//! line's baseline sits at `BASELINE_RATIO` of its line height below the
//! line's top.
//!
//! Page-break policy: before a unit (a heading together with its body, or a
//! heading together with an image) is placed, its full height is computed.
//! If `y + height > page_height_limit` a new page starts and `y` resets to
//! the top margin. Units are never split. The only exception is a unit
//! taller than a whole usable page, which is continued line by line so that
//! `y <= page_height_limit` always holds.

use crate::config::{PageGeometry, Spacing};
use crate::document::{Page, PlacedImage};
use crate::snapshot::VisualizationSnapshot;
use crate::text::{FontFace, TextMetrics};
use mr_common::ConfidenceTier;
use serde::Serialize;
use tracing::{debug, warn};

/// Fraction of the line height from a line's top to its baseline.
pub const BASELINE_RATIO: f32 = 0.8;

/// Bullet glyph plus separator.
pub const BULLET: &str = "\u{2022} ";

/// Mutable layout position owned by one assembly pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutCursor {
    /// 1-based page number.
    pub page: u32,
    /// Top of the free space on the current page.
    pub y: f32,
    /// Flowed content never extends below this line.
    pub page_height_limit: f32,
    /// Where `y` resets on a new page.
    pub top_margin: f32,
}

impl LayoutCursor {
    /// Cursor at the top of page 1.
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            page: 1,
            y: geometry.margin_top,
            page_height_limit: geometry.page_height_limit,
            top_margin: geometry.margin_top,
        }
    }

    /// Whether nothing has been placed on the current page yet.
    pub fn is_at_page_top(&self) -> bool {
        self.y <= self.top_margin
    }

    /// Vertical space left on the current page.
    pub fn remaining(&self) -> f32 {
        self.page_height_limit - self.y
    }
}

/// Semantic role of a block; drives font, size and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleHint {
    Title,
    Subtitle,
    Metadata,
    SectionHeading,
    SubHeading,
    /// Classification and confidence lines.
    Result,
    Body,
    /// Tier line, coloured by tier.
    Confidence(ConfidenceTier),
    Footer,
}

impl StyleHint {
    pub fn face(&self) -> FontFace {
        match self {
            StyleHint::Title | StyleHint::SectionHeading | StyleHint::SubHeading => {
                FontFace::HelveticaBold
            }
            _ => FontFace::Helvetica,
        }
    }

    /// Font size in points.
    pub fn size_pt(&self) -> f32 {
        match self {
            StyleHint::Title => 24.0,
            StyleHint::Subtitle => 16.0,
            StyleHint::SectionHeading => 18.0,
            StyleHint::SubHeading | StyleHint::Result => 14.0,
            StyleHint::Metadata | StyleHint::Body | StyleHint::Confidence(_) => 12.0,
            StyleHint::Footer => 10.0,
        }
    }

    /// Fill colour as 8-bit RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            StyleHint::Title | StyleHint::SectionHeading | StyleHint::SubHeading => (30, 58, 138),
            StyleHint::Subtitle | StyleHint::Footer => (107, 114, 128),
            StyleHint::Metadata => (75, 85, 99),
            StyleHint::Result | StyleHint::Body => (55, 65, 81),
            StyleHint::Confidence(tier) => tier.color(),
        }
    }

    pub fn metrics(&self) -> TextMetrics {
        TextMetrics::new(self.face(), self.size_pt())
    }

    fn is_heading(&self) -> bool {
        matches!(
            self,
            StyleHint::Title | StyleHint::Subtitle | StyleHint::SectionHeading | StyleHint::SubHeading
        )
    }

    /// Vertical advance per line in this style.
    pub fn line_height(&self, spacing: &Spacing) -> f32 {
        if self.is_heading() {
            spacing.heading_advance
        } else if *self == StyleHint::Footer {
            spacing.footer_line_height
        } else {
            spacing.line_height
        }
    }
}

/// Kind of text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    BulletList,
}

/// Horizontal anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// `x` is the left edge.
    Left,
    /// `x` is the centre line.
    Center,
}

/// One rendered line with its offset from the block's `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub indent: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            indent: 0.0,
        }
    }
}

/// A block of lines sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub lines: Vec<TextLine>,
    pub style: StyleHint,
}

impl ContentBlock {
    /// Single-line heading.
    pub fn heading(text: impl Into<String>, style: StyleHint) -> Self {
        Self {
            kind: BlockKind::Heading,
            lines: vec![TextLine::new(text)],
            style,
        }
    }

    /// Paragraph from already-wrapped lines.
    pub fn paragraph<S: Into<String>>(lines: impl IntoIterator<Item = S>, style: StyleHint) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            lines: lines.into_iter().map(TextLine::new).collect(),
            style,
        }
    }

    /// Bullet list; items wider than `max_width` wrap with a hanging indent.
    pub fn bullet_list<S: AsRef<str>>(items: &[S], max_width: f32, style: StyleHint) -> Self {
        let metrics = style.metrics();
        let indent = metrics.width(BULLET);
        let mut lines = Vec::new();
        for item in items {
            let wrapped = metrics.wrap(item.as_ref(), max_width - indent);
            let mut wrapped = wrapped.into_iter();
            let first = wrapped.next().unwrap_or_default();
            lines.push(TextLine::new(format!("{}{}", BULLET, first)));
            lines.extend(wrapped.map(|text| TextLine { text, indent }));
        }
        Self {
            kind: BlockKind::BulletList,
            lines,
            style,
        }
    }

    pub fn line_height(&self, spacing: &Spacing) -> f32 {
        self.style.line_height(spacing)
    }

    /// Height the block occupies when placed.
    pub fn height(&self, spacing: &Spacing) -> f32 {
        self.lines.len() as f32 * self.line_height(spacing)
    }

    /// Lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn into_single_lines(self) -> Vec<ContentBlock> {
        let (kind, style) = (self.kind, self.style);
        self.lines
            .into_iter()
            .map(|line| ContentBlock {
                kind,
                lines: vec![line],
                style,
            })
            .collect()
    }
}

/// A content block at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub x: f32,
    pub top: f32,
    pub align: Align,
    pub line_height: f32,
    pub block: ContentBlock,
}

impl PlacedBlock {
    pub fn height(&self) -> f32 {
        self.block.lines.len() as f32 * self.line_height
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height()
    }

    /// Baseline y of each line.
    pub fn baselines(&self) -> impl Iterator<Item = (f32, &TextLine)> + '_ {
        self.block.lines.iter().enumerate().map(move |(i, line)| {
            (
                self.top + self.line_height * (i as f32 + BASELINE_RATIO),
                line,
            )
        })
    }
}

/// Places blocks onto pages, starting new pages when space runs out.
pub struct SectionPlacer<'a> {
    geometry: &'a PageGeometry,
    spacing: &'a Spacing,
    pages: Vec<Page>,
}

impl<'a> SectionPlacer<'a> {
    /// Placer with one empty page.
    pub fn new(geometry: &'a PageGeometry, spacing: &'a Spacing) -> Self {
        Self {
            geometry,
            spacing,
            pages: vec![Page::new(1)],
        }
    }

    /// Cursor at the top of the first page.
    pub fn start(&self) -> LayoutCursor {
        LayoutCursor::new(self.geometry)
    }

    pub fn geometry(&self) -> &PageGeometry {
        self.geometry
    }

    pub fn spacing(&self) -> &Spacing {
        self.spacing
    }

    /// Start a new page if `required_height` does not fit below the cursor.
    pub fn begin_page_if_needed(
        &mut self,
        cursor: LayoutCursor,
        required_height: f32,
    ) -> LayoutCursor {
        if cursor.y + required_height > cursor.page_height_limit {
            self.next_page(cursor)
        } else {
            cursor
        }
    }

    fn next_page(&mut self, cursor: LayoutCursor) -> LayoutCursor {
        let page = cursor.page + 1;
        self.pages.push(Page::new(page));
        debug!(page, from_y = cursor.y, "Page break");
        LayoutCursor {
            page,
            y: cursor.top_margin,
            ..cursor
        }
    }

    /// Wrap `text` to the column width in `style`.
    pub fn paragraph(&self, text: &str, style: StyleHint) -> ContentBlock {
        let lines = style.metrics().wrap(text, self.geometry.content_width);
        ContentBlock::paragraph(lines, style)
    }

    /// Bullet block sized to the column width.
    pub fn bullets<S: AsRef<str>>(&self, items: &[S]) -> ContentBlock {
        ContentBlock::bullet_list(items, self.geometry.content_width, StyleHint::Body)
    }

    /// Place a block directly below the cursor with no leading gap.
    pub fn place_lines(
        &mut self,
        cursor: LayoutCursor,
        block: ContentBlock,
        align: Align,
    ) -> LayoutCursor {
        self.place_unit(cursor, vec![block], align, 0.0)
    }

    /// Place a block after a section gap.
    pub fn place_spaced(
        &mut self,
        cursor: LayoutCursor,
        block: ContentBlock,
        align: Align,
    ) -> LayoutCursor {
        let gap = self.spacing.section_gap;
        self.place_unit(cursor, vec![block], align, gap)
    }

    /// Place a heading and its body as one unit after a section gap.
    pub fn place_section(
        &mut self,
        cursor: LayoutCursor,
        header: &str,
        header_style: StyleHint,
        body: Vec<ContentBlock>,
    ) -> LayoutCursor {
        debug!(page = cursor.page, y = cursor.y, header, "Placing section");
        let mut blocks = Vec::with_capacity(body.len() + 1);
        blocks.push(ContentBlock::heading(header, header_style));
        blocks.extend(body);
        let gap = self.spacing.section_gap;
        self.place_unit(cursor, blocks, Align::Left, gap)
    }

    /// Place a bullet list below the cursor.
    pub fn place_bullet_list<S: AsRef<str>>(
        &mut self,
        cursor: LayoutCursor,
        items: &[S],
    ) -> LayoutCursor {
        let block = self.bullets(items);
        self.place_unit(cursor, vec![block], Align::Left, 0.0)
    }

    /// Place an optional heading and the snapshot as one unsplittable unit.
    ///
    /// The image is `target_width` wide and keeps the snapshot's declared
    /// aspect ratio. If that would not fit on an empty page it is scaled
    /// down uniformly.
    pub fn place_image(
        &mut self,
        cursor: LayoutCursor,
        heading: Option<(&str, StyleHint)>,
        snapshot: VisualizationSnapshot,
        target_width: f32,
    ) -> LayoutCursor {
        let heading = heading.map(|(text, style)| ContentBlock::heading(text, style));
        let heading_height = heading
            .as_ref()
            .map(|h| h.height(self.spacing))
            .unwrap_or(0.0);

        let mut width = target_width;
        let mut height = snapshot.aspect_height(target_width);
        let available = self.geometry.usable_height() - heading_height;
        if height > available {
            let scale = available / height;
            warn!(
                height,
                available, scale, "Snapshot taller than a page; scaling down"
            );
            width *= scale;
            height = available;
        }

        let gap = if cursor.is_at_page_top() {
            0.0
        } else {
            self.spacing.section_gap
        };
        let mut cursor = self.begin_page_if_needed(cursor, gap + heading_height + height);
        if !cursor.is_at_page_top() {
            cursor.y += gap;
        }

        if let Some(block) = heading {
            cursor = self.push(cursor, block, Align::Left);
        }

        let x = self.geometry.margin_left + ((self.geometry.content_width - width) / 2.0).max(0.0);
        debug!(
            page = cursor.page,
            top = cursor.y,
            width,
            height,
            pixel_width = snapshot.pixel_width,
            pixel_height = snapshot.pixel_height,
            "Placing snapshot"
        );
        let image = PlacedImage {
            x,
            top: cursor.y,
            width,
            height,
            snapshot,
        };
        self.current_page().image = Some(image);
        cursor.y += height;
        cursor
    }

    /// Finish placement and hand over the pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    fn current_page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn place_unit(
        &mut self,
        cursor: LayoutCursor,
        blocks: Vec<ContentBlock>,
        align: Align,
        gap: f32,
    ) -> LayoutCursor {
        let content: f32 = blocks.iter().map(|b| b.height(self.spacing)).sum();
        let gap = if cursor.is_at_page_top() { 0.0 } else { gap };

        if content > self.geometry.usable_height() {
            return self.place_split(cursor, blocks, align, gap);
        }

        let mut cursor = self.begin_page_if_needed(cursor, gap + content);
        if !cursor.is_at_page_top() {
            cursor.y += gap;
        }
        for block in blocks {
            cursor = self.push(cursor, block, align);
        }
        cursor
    }

    /// Continue an oversize unit one line at a time.
    fn place_split(
        &mut self,
        cursor: LayoutCursor,
        blocks: Vec<ContentBlock>,
        align: Align,
        gap: f32,
    ) -> LayoutCursor {
        debug!(page = cursor.page, "Unit taller than a page; continuing across pages");
        let mut cursor = cursor;
        let mut lead = gap;
        for line in blocks.into_iter().flat_map(ContentBlock::into_single_lines) {
            let height = line.height(self.spacing);
            cursor = self.begin_page_if_needed(cursor, lead + height);
            if !cursor.is_at_page_top() {
                cursor.y += lead;
            }
            cursor = self.push(cursor, line, align);
            lead = 0.0;
        }
        cursor
    }

    fn push(&mut self, mut cursor: LayoutCursor, block: ContentBlock, align: Align) -> LayoutCursor {
        let x = match align {
            Align::Left => self.geometry.margin_left,
            Align::Center => self.geometry.center_x(),
        };
        let line_height = block.line_height(self.spacing);
        let placed = PlacedBlock {
            x,
            top: cursor.y,
            align,
            line_height,
            block,
        };
        cursor.y = placed.bottom();
        self.current_page().blocks.push(placed);
        cursor
    }
}
