// insiders-core/src/application/validate.rs

use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::validation::{PipelineOptions, ValidationPipeline, ValidationReport};
use crate::error::InsidersError;
use crate::infrastructure::fs::read_source;

pub fn validate_bytes(source: &[u8], options: PipelineOptions) -> ValidationReport {
    ValidationPipeline::new(options).run(source)
}

/// Reads a file (or stdin for `-`) and runs the whole check catalog on it.
///
/// Only a failure to read the source is an error; an inadmissible file is a
/// normal outcome carried by the report.
#[instrument(skip(options), fields(path = %path.display()))]
pub fn validate_file(path: &Path, options: PipelineOptions) -> Result<ValidationReport, InsidersError> {
    let bytes = read_source(path)?;
    let report = validate_bytes(&bytes, options);

    if report.is_admissible() {
        info!(
            rows_read = ?report.rows_read,
            rows_admitted = ?report.rows_admitted,
            "✅ Dataset admitted"
        );
    } else {
        warn!(check = ?report.verdict.failed_check(), "❌ Dataset rejected");
    }
    Ok(report)
}
