//! Confidence tiers.
//!
//! A tier is derived from a confidence percentage every time it is needed.
//! The boundaries live in [`TIER_THRESHOLDS`] and nowhere else: content
//! selection, the colour hint and the technical disclaimer all read from it.
//!
//! Boundaries are inclusive at the lower end of each tier:
//!
//! | tier   | range          |
//! |--------|----------------|
//! | High   | `c >= 80`      |
//! | Medium | `60 <= c < 80` |
//! | Low    | `c < 60`       |
//!
//! Values outside `[0, 100]` (and NaN) still map to a tier; NaN fails every
//! comparison and lands in `Low`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bounds for the High and Medium tiers, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    /// Minimum confidence for `High`.
    pub high: f64,
    /// Minimum confidence for `Medium`.
    pub medium: f64,
}

/// The one table every tier decision reads.
pub const TIER_THRESHOLDS: TierThresholds = TierThresholds {
    high: 80.0,
    medium: 60.0,
};

/// Qualitative banding of a confidence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Derive the tier for a confidence percentage.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= TIER_THRESHOLDS.high {
            ConfidenceTier::High
        } else if confidence >= TIER_THRESHOLDS.medium {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Short name ("High", "Medium", "Low").
    pub fn name(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::Low => "Low",
        }
    }

    /// Wording used in reports, e.g. "High Confidence".
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "High Confidence",
            ConfidenceTier::Medium => "Medium Confidence",
            ConfidenceTier::Low => "Low Confidence",
        }
    }

    /// Colour hint as 8-bit RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            ConfidenceTier::High => (0x05, 0x96, 0x69),
            ConfidenceTier::Medium => (0xf5, 0x9e, 0x0b),
            ConfidenceTier::Low => (0xdc, 0x26, 0x26),
        }
    }

    /// Colour hint as a CSS hex string.
    pub fn hex_color(&self) -> String {
        let (r, g, b) = self.color();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Severity shown next to the tier.
///
/// `Normal` when no pathology was found, otherwise the confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Tier(ConfidenceTier),
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "Normal"),
            Severity::Tier(tier) => write!(f, "{}", tier.name()),
        }
    }
}
