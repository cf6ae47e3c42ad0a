// insiders-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Cannot determine job status: {0}")]
    #[diagnostic(
        code(insiders::domain::job_status),
        help("Pass the job's exit code, or configure `status_source: log_line_count` with a notebook path.")
    )]
    MissingStatusSignal(String),

    #[error("Invalid logging call-site pattern: {0}")]
    #[diagnostic(code(insiders::domain::pattern))]
    InvalidPattern(#[from] regex::Error),
}
