//! Label-to-text lookup tables.
//!
//! Every function here is total. A label outside the closed set resolves to
//! the fallback texts; the classifier is authoritative, so an unknown label
//! is reported rather than rejected.
//!
//! Recommendation and assessment text depend on a single branch: whether
//! the label denotes absence or presence of pathology. Confidence never
//! changes which text is chosen.

use mr_common::{ClassificationResult, TumorClass};

/// How much narrative a report variant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    /// Short texts used by the basic report.
    Brief,
    /// Longer texts used by the detailed report.
    Comprehensive,
}

/// What the label says about pathology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
    /// Label denotes absence of pathology.
    Absent,
    /// Label denotes a tumor type.
    Present,
    /// Label is outside the closed set.
    Unrecognized,
}

impl Finding {
    /// Classify a raw label.
    pub fn from_label(label: &str) -> Self {
        match TumorClass::from_label(label) {
            Some(class) if class.is_absence() => Finding::Absent,
            Some(_) => Finding::Present,
            None => Finding::Unrecognized,
        }
    }
}

const FALLBACK_DESCRIPTION: &str = "Unknown tumor type requiring further analysis.";

const FALLBACK_DESCRIPTION_COMPREHENSIVE: &str = "Further analysis required to determine tumor \
characteristics and appropriate treatment options. Additional imaging studies may be necessary \
for definitive diagnosis.";

const FALLBACK_RECOMMENDATION: &str = "Further analysis required. The classification could not be \
matched to a known category; review of the scan by a qualified specialist is recommended before \
any clinical decision.";

const FALLBACK_ASSESSMENT: [&str; 4] = [
    "Classification label not recognized by the report engine",
    "Further analysis required before clinical interpretation",
    "Recommend manual review of the MRI scan by a radiologist",
    "Repeat analysis once the classification is confirmed",
];

const ABSENCE_RECOMMENDATION: &str = "Continue with routine monitoring as recommended by your \
healthcare provider. Schedule follow-up appointments as advised.";

const PRESENCE_RECOMMENDATION: &str = "Immediate consultation with a neurosurgeon or oncologist is \
strongly recommended for comprehensive evaluation and treatment planning.";

const PRESENCE_RECOMMENDATION_COMPREHENSIVE: &str = "Immediate consultation with a neurosurgeon or \
oncologist is strongly recommended for comprehensive evaluation and treatment planning. \
Additional imaging studies may be required.";

const ABSENCE_ASSESSMENT: [&str; 4] = [
    "Analysis indicates healthy brain tissue with no tumor detected",
    "Confidence level suggests reliable negative finding",
    "Recommend continued routine monitoring",
    "Follow-up imaging as per standard protocols",
];

const PRESENCE_ASSESSMENT: [&str; 4] = [
    "AI analysis detected potential tumor with clinical significance",
    "Confidence level indicates need for immediate medical review",
    "Recommend consultation with neurosurgeon/oncologist",
    "Additional imaging studies may be required for confirmation",
];

const ABSENCE_ASSESSMENT_COMPREHENSIVE: [&str; 4] = [
    "No evidence of tumor detected in the analyzed MRI scan",
    "Brain tissue appears normal with healthy structure",
    "Confidence level supports reliable negative finding",
    "Recommend continued routine monitoring protocols",
];

const PRESENCE_ASSESSMENT_COMPREHENSIVE: [&str; 4] = [
    "AI analysis detected potential tumor requiring medical attention",
    "Confidence level indicates significant clinical concern",
    "Immediate consultation with specialist recommended",
    "Additional diagnostic procedures may be required",
];

/// Brief description of the category.
pub fn resolve_description(label: &str) -> &'static str {
    describe(label, Narrative::Brief)
}

/// Clinical recommendation, selected by the absence/presence branch.
pub fn resolve_recommendation(label: &str) -> &'static str {
    recommend(label, Narrative::Brief)
}

/// Structured assessment bullets, selected by the absence/presence branch.
pub fn resolve_assessment(label: &str) -> Vec<&'static str> {
    assess(label, Narrative::Brief).to_vec()
}

/// Description text for the given depth.
pub fn describe(label: &str, narrative: Narrative) -> &'static str {
    let Some(class) = TumorClass::from_label(label) else {
        return match narrative {
            Narrative::Brief => FALLBACK_DESCRIPTION,
            Narrative::Comprehensive => FALLBACK_DESCRIPTION_COMPREHENSIVE,
        };
    };
    match (class, narrative) {
        (TumorClass::Glioma, Narrative::Brief) => {
            "A type of tumor that occurs in the brain and spinal cord. Gliomas are the most \
             common type of primary brain tumor."
        }
        (TumorClass::Meningioma, Narrative::Brief) => {
            "A tumor that forms on membranes covering the brain and spinal cord. Most \
             meningiomas are benign and slow-growing."
        }
        (TumorClass::NoTumor, Narrative::Brief) => {
            "Healthy brain tissue with no tumor detected. The analysis shows normal brain \
             structure."
        }
        (TumorClass::Pituitary, Narrative::Brief) => {
            "A tumor in the pituitary gland at the base of the brain. These can affect hormone \
             production."
        }
        (TumorClass::Glioma, Narrative::Comprehensive) => {
            "Gliomas are the most common type of primary brain tumor. They originate from glial \
             cells and can be classified as low-grade or high-grade based on their \
             aggressiveness. Treatment options include surgery, radiation therapy, and \
             chemotherapy depending on the grade and location."
        }
        (TumorClass::Meningioma, Narrative::Comprehensive) => {
            "Meningiomas are typically benign tumors that arise from the meninges. They are \
             usually slow-growing and may not require immediate treatment depending on size and \
             location. Surgical removal is often the primary treatment option."
        }
        (TumorClass::NoTumor, Narrative::Comprehensive) => {
            "The analysis indicates healthy brain tissue with no evidence of tumor. This is a \
             positive finding, but regular monitoring is still recommended as part of routine \
             healthcare protocols."
        }
        (TumorClass::Pituitary, Narrative::Comprehensive) => {
            "Pituitary tumors can affect hormone production and may cause various symptoms. \
             Treatment depends on the tumor type and hormone production. Options include \
             medication, surgery, or radiation therapy."
        }
    }
}

/// Recommendation text for the given depth.
pub fn recommend(label: &str, narrative: Narrative) -> &'static str {
    match (Finding::from_label(label), narrative) {
        (Finding::Absent, _) => ABSENCE_RECOMMENDATION,
        (Finding::Present, Narrative::Brief) => PRESENCE_RECOMMENDATION,
        (Finding::Present, Narrative::Comprehensive) => PRESENCE_RECOMMENDATION_COMPREHENSIVE,
        (Finding::Unrecognized, _) => FALLBACK_RECOMMENDATION,
    }
}

/// Assessment bullets for the given depth.
pub fn assess(label: &str, narrative: Narrative) -> &'static [&'static str] {
    match (Finding::from_label(label), narrative) {
        (Finding::Absent, Narrative::Brief) => &ABSENCE_ASSESSMENT,
        (Finding::Absent, Narrative::Comprehensive) => &ABSENCE_ASSESSMENT_COMPREHENSIVE,
        (Finding::Present, Narrative::Brief) => &PRESENCE_ASSESSMENT,
        (Finding::Present, Narrative::Comprehensive) => &PRESENCE_ASSESSMENT_COMPREHENSIVE,
        (Finding::Unrecognized, _) => &FALLBACK_ASSESSMENT,
    }
}

/// Everything the narrative sections need for one result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub description: &'static str,
    pub recommendation: &'static str,
    pub assessment: &'static [&'static str],
}

impl ResolvedContent {
    /// Resolve all narrative texts for a result.
    pub fn resolve(result: &ClassificationResult, narrative: Narrative) -> Self {
        Self {
            description: describe(&result.label, narrative),
            recommendation: recommend(&result.label, narrative),
            assessment: assess(&result.label, narrative),
        }
    }
}
