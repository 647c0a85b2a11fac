//! Shared types for MRI report generation.
//!
//! This crate provides the foundational types used by the report engine and
//! the command-line front end:
//! - Classification results as delivered by the upstream classifier
//! - The closed set of diagnostic categories
//! - Confidence tiers and their single threshold table
//! - Payload formats for the command-line front end
//! - JSON schema export for the classifier input

pub mod classification;
pub mod confidence;
pub mod output;
pub mod schema;

pub use classification::{ClassificationResult, LabelError, TumorClass};
pub use confidence::{ConfidenceTier, Severity, TierThresholds, TIER_THRESHOLDS};
pub use output::OutputFormat;
pub use schema::{classification_schema, SCHEMA_VERSION};
