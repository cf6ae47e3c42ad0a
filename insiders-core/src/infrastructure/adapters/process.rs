// insiders-core/src/infrastructure/adapters/process.rs

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::{error, info, instrument};

use crate::domain::project::JobConfig;
use crate::domain::report::JobOutcome;
use crate::ports::job_runner::JobRunner;

/// Runs the job as a child process and waits for it.
#[derive(Debug, Default)]
pub struct ProcessRunner;

#[async_trait]
impl JobRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %job.command))]
    async fn run(&self, job: &JobConfig) -> JobOutcome {
        let started_at = Utc::now();
        info!(args = ?job.args, cwd = ?job.working_dir, "Starting job");

        let status = Command::new(&job.command)
            .args(&job.args)
            .current_dir(&job.working_dir)
            .status()
            .await;

        let finished_at = Utc::now();
        match status {
            Ok(status) => {
                info!(exit_code = ?status.code(), elapsed_ms = (finished_at - started_at).num_milliseconds(), "Job finished");
                JobOutcome {
                    exit_code: status.code(),
                    started_at,
                    finished_at,
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Job could not be started");
                JobOutcome {
                    exit_code: None,
                    started_at,
                    finished_at,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
