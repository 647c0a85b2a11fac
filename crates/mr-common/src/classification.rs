//! Classification results and the closed set of diagnostic categories.

use crate::confidence::{ConfidenceTier, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Diagnostic categories produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TumorClass {
    Glioma,
    Meningioma,
    #[serde(rename = "No Tumor")]
    NoTumor,
    Pituitary,
}

/// Error returned when a label is outside the closed category set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown classification label: {0:?}")]
pub struct LabelError(pub String);

impl TumorClass {
    /// All categories, in classifier output order.
    pub fn all() -> &'static [TumorClass] {
        &[
            TumorClass::Glioma,
            TumorClass::Meningioma,
            TumorClass::NoTumor,
            TumorClass::Pituitary,
        ]
    }

    /// Canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            TumorClass::Glioma => "Glioma",
            TumorClass::Meningioma => "Meningioma",
            TumorClass::NoTumor => "No Tumor",
            TumorClass::Pituitary => "Pituitary",
        }
    }

    /// Match a label against the closed set.
    ///
    /// Case-insensitive; spaces, underscores and hyphens are ignored so that
    /// `"No Tumor"`, `"no_tumor"` and `"notumor"` all resolve.
    pub fn from_label(label: &str) -> Option<Self> {
        let folded: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "glioma" => Some(TumorClass::Glioma),
            "meningioma" => Some(TumorClass::Meningioma),
            "notumor" => Some(TumorClass::NoTumor),
            "pituitary" => Some(TumorClass::Pituitary),
            _ => None,
        }
    }

    /// Whether this category denotes absence of pathology.
    pub fn is_absence(&self) -> bool {
        matches!(self, TumorClass::NoTumor)
    }

    /// Bar colour used by the confidence chart.
    pub fn chart_color(&self) -> (u8, u8, u8) {
        match self {
            TumorClass::Glioma => (0x7c, 0x3a, 0xed),
            TumorClass::Meningioma => (0xdc, 0x26, 0x26),
            TumorClass::NoTumor => (0x14, 0xb8, 0xa6),
            TumorClass::Pituitary => (0xf5, 0x9e, 0x0b),
        }
    }
}

impl fmt::Display for TumorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TumorClass {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TumorClass::from_label(s).ok_or_else(|| LabelError(s.to_string()))
    }
}

/// A classifier verdict: label plus confidence percentage.
///
/// Deserializes from the classifier's wire shape
/// (`{"class": "Glioma", "confidence": 55.0}`); extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResult {
    /// Label as reported upstream. Not required to be in the closed set.
    #[serde(rename = "class")]
    pub label: String,
    /// Confidence in percent. Values outside [0, 100] are accepted.
    pub confidence: f64,
}

impl ClassificationResult {
    /// Create a result.
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Parse from the classifier's JSON payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The matching category, if the label is in the closed set.
    pub fn tumor_class(&self) -> Option<TumorClass> {
        TumorClass::from_label(&self.label)
    }

    /// Whether the label denotes absence of pathology.
    pub fn denotes_absence(&self) -> bool {
        self.tumor_class().is_some_and(|c| c.is_absence())
    }

    /// Tier for this result's confidence, derived on every call.
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// Severity: `Normal` for absence of pathology, otherwise the tier.
    pub fn severity(&self) -> Severity {
        if self.denotes_absence() {
            Severity::Normal
        } else {
            Severity::Tier(self.tier())
        }
    }

    /// Confidence as shown in reports, e.g. `"92%"` or `"87.5%"`.
    pub fn confidence_display(&self) -> String {
        format!("{}%", self.confidence)
    }
}
