//! Report sections.
//!
//! Each section knows its own texts and hands blocks to the
//! [`SectionPlacer`](crate::layout::SectionPlacer); none of them touch page
//! coordinates directly. The footer is the exception: it is stamped onto
//! every page once placement has finished.

pub mod analysis;
pub mod diagnostics;
pub mod footer;
pub mod header;
pub mod technical;
pub mod visualization;

pub use analysis::AnalysisSection;
pub use diagnostics::DiagnosticsSection;
pub use footer::FooterTemplate;
pub use header::HeaderSection;
pub use technical::TechnicalSection;
pub use visualization::VisualizationSection;
