pub mod dataset;
pub mod error;
pub mod project;
pub mod report;
pub mod validation;

// Convenient re-exports to simplify imports elsewhere
pub use error::DomainError;
