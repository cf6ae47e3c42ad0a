// insiders-core/src/domain/validation/mod.rs

pub mod catalog;
pub mod checks;
pub mod error;
pub mod pipeline;
pub mod verdict;

// Re-exports
pub use catalog::{CATALOG, Check};
pub use error::{CheckError, CheckErrorKind};
pub use pipeline::{CheckFailure, PipelineOptions, ValidationPipeline, ValidationReport};
pub use verdict::Verdict;
