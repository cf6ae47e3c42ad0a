// insiders-core/src/application/mod.rs

pub mod job;
pub mod reporter;
pub mod validate;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use insiders_core::application::{validate_file, VerdictReporter, run_and_report};`

pub use job::{JobReport, report_latest, run_and_report};
pub use reporter::{UserMessage, VerdictReporter};
pub use validate::{validate_bytes, validate_file};
