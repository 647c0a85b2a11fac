//! Embedded visualization snapshot.

use crate::layout::{LayoutCursor, SectionPlacer, StyleHint};
use crate::snapshot::VisualizationSnapshot;

pub const HEADING: &str = "Visualization Charts";

pub struct VisualizationSection {
    pub snapshot: VisualizationSnapshot,
    pub target_width: f32,
}

impl VisualizationSection {
    pub fn new(snapshot: VisualizationSnapshot, target_width: f32) -> Self {
        Self {
            snapshot,
            target_width,
        }
    }

    /// Place heading and image as one unit.
    pub fn place(self, placer: &mut SectionPlacer<'_>, cursor: LayoutCursor) -> LayoutCursor {
        placer.place_image(
            cursor,
            Some((HEADING, StyleHint::SectionHeading)),
            self.snapshot,
            self.target_width,
        )
    }
}
