// insiders-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsidersError {
    // --- DOMAIN ERRORS (validation rules, job status) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, YAML, SMTP) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for InsidersError {
    fn from(err: std::io::Error) -> Self {
        InsidersError::Infrastructure(InfrastructureError::Io(err))
    }
}
