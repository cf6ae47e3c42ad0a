// insiders-core/src/ports/mod.rs

pub mod job_runner;
pub mod notifier;

pub use job_runner::JobRunner;
pub use notifier::Notifier;
