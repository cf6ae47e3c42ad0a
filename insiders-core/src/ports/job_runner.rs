// insiders-core/src/ports/job_runner.rs

use crate::domain::project::JobConfig;
use crate::domain::report::JobOutcome;
use async_trait::async_trait;

#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Runs the job to completion. Failing to start is reported in the
    /// outcome, never as an error, so the report step always follows.
    async fn run(&self, job: &JobConfig) -> JobOutcome;
}
