// insiders-core/src/application/job.rs

use serde::Serialize;
use std::fs;
use tracing::{info, instrument, warn};

use crate::domain::project::JobConfig;
use crate::domain::report::{
    JobOutcome, JobStatus, LogFile, Notification, StatusSource, compose_report, resolve_status,
};
use crate::error::InsidersError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::logs::latest_log;
use crate::ports::{JobRunner, Notifier};

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// `None` when only the report step ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<JobOutcome>,
    pub status: JobStatus,
    pub notification: Notification,
    pub channel: String,
}

/// Runs the job, then always reports on it, whatever the job did.
#[instrument(skip_all, fields(command = %job.command, channel = notifier.channel()))]
pub async fn run_and_report(
    runner: &dyn JobRunner,
    notifier: &dyn Notifier,
    job: &JobConfig,
) -> Result<JobReport, InsidersError> {
    let outcome = runner.run(job).await;
    let mut problems = Vec::new();
    if let Some(err) = &outcome.error {
        problems.push(format!("Job could not be started: {}", err));
    }

    // Nothing below may keep the report from going out.
    let log = latest_log(&job.log_dir).unwrap_or_else(|e| {
        warn!(error = %e, "Log directory could not be read");
        problems.push(format!("Log directory could not be read: {}", e));
        None
    });

    let status = match job.status_source {
        StatusSource::ExitCode if !outcome.succeeded() => JobStatus::Failed,
        _ => decide_status(job, outcome.exit_code, log.as_ref()).unwrap_or_else(|e| {
            warn!(error = %e, "Job status could not be determined");
            problems.push(format!("Job status could not be determined: {}", e));
            JobStatus::Failed
        }),
    };
    let status = if problems.is_empty() {
        status
    } else {
        JobStatus::Failed
    };

    let mut notification = compose_report(status, log.as_ref());
    for problem in &problems {
        notification.body.push_str(&format!("\n{}\n", problem));
    }

    deliver(notifier, &notification).await?;
    Ok(JobReport {
        outcome: Some(outcome),
        status,
        notification,
        channel: notifier.channel().to_string(),
    })
}

/// Reports on a run that happened elsewhere (e.g. a cron line chaining the
/// job and this command). `exit_code` is required in `exit_code` mode.
#[instrument(skip_all, fields(log_dir = %job.log_dir.display(), channel = notifier.channel()))]
pub async fn report_latest(
    notifier: &dyn Notifier,
    job: &JobConfig,
    exit_code: Option<i32>,
) -> Result<JobReport, InsidersError> {
    let log = latest_log(&job.log_dir)?;
    let status = decide_status(job, exit_code, log.as_ref())?;
    let notification = compose_report(status, log.as_ref());

    deliver(notifier, &notification).await?;
    Ok(JobReport {
        outcome: None,
        status,
        notification,
        channel: notifier.channel().to_string(),
    })
}

fn decide_status(
    job: &JobConfig,
    exit_code: Option<i32>,
    log: Option<&LogFile>,
) -> Result<JobStatus, InsidersError> {
    let notebook = match (job.status_source, &job.notebook) {
        (StatusSource::LogLineCount, Some(path)) => {
            let bytes = fs::read(path).map_err(InfrastructureError::Io)?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => None,
    };

    let status = resolve_status(
        job.status_source,
        exit_code,
        log.map(|l| l.content.as_str()),
        notebook.as_deref(),
    )?;
    Ok(status)
}

async fn deliver(notifier: &dyn Notifier, notification: &Notification) -> Result<(), InsidersError> {
    match notifier.send(notification).await {
        Ok(()) => {
            info!(subject = %notification.subject, "📨 Report delivered");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Report could not be delivered");
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    struct MockRunner {
        exit_code: Option<i32>,
        error: Option<String>,
    }

    #[async_trait]
    impl JobRunner for MockRunner {
        async fn run(&self, _job: &JobConfig) -> JobOutcome {
            let now = Utc::now();
            JobOutcome {
                exit_code: self.exit_code,
                started_at: now,
                finished_at: now,
                error: self.error.clone(),
            }
        }
    }

    struct MockNotifier {
        pub sent: Arc<Mutex<Vec<Notification>>>,
    }

    impl MockNotifier {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn send(&self, notification: &Notification) -> Result<(), InsidersError> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }

        fn channel(&self) -> &str {
            "mock"
        }
    }

    fn job(log_dir: &Path, source: StatusSource, notebook: Option<PathBuf>) -> JobConfig {
        JobConfig {
            command: "papermill".into(),
            args: vec![],
            working_dir: PathBuf::from("."),
            log_dir: log_dir.to_path_buf(),
            status_source: source,
            notebook,
        }
    }

    #[tokio::test]
    async fn test_successful_run_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-01-08.log"), "INFO start\nINFO done\n").unwrap();
        let notifier = MockNotifier::new();
        let runner = MockRunner {
            exit_code: Some(0),
            error: None,
        };

        let report = run_and_report(&runner, &notifier, &job(dir.path(), StatusSource::ExitCode, None))
            .await
            .unwrap();

        assert_eq!(report.status, JobStatus::Successful);
        assert_eq!(report.channel, "mock");
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Insiders log: SUCCESSFUL");
        assert_eq!(sent[0].body, "INFO start\nINFO done\n");
    }

    #[tokio::test]
    async fn test_failed_run_is_still_reported() {
        let dir = tempdir().unwrap();
        let notifier = MockNotifier::new();
        let runner = MockRunner {
            exit_code: None,
            error: Some("No such file or directory".into()),
        };

        let report = run_and_report(&runner, &notifier, &job(dir.path(), StatusSource::ExitCode, None))
            .await
            .unwrap();

        assert_eq!(report.status, JobStatus::Failed);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "Insiders log: FAILED");
        assert!(sent[0].body.contains("No log file"));
        assert!(sent[0].body.contains("could not be started"));
    }

    #[tokio::test]
    async fn test_unreadable_notebook_still_sends_failed_report() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-01-08.log"), "INFO a\n").unwrap();
        let notifier = MockNotifier::new();
        let runner = MockRunner {
            exit_code: Some(0),
            error: None,
        };
        let cfg = job(
            dir.path(),
            StatusSource::LogLineCount,
            Some(dir.path().join("missing.ipynb")),
        );

        let report = run_and_report(&runner, &notifier, &cfg).await.unwrap();

        assert_eq!(report.status, JobStatus::Failed);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Insiders log: FAILED");
        assert!(sent[0].body.starts_with("INFO a\n"));
        assert!(sent[0].body.contains("Job status could not be determined"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_log_dir_still_sends_failed_report() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir(&logs).unwrap();
        fs::write(logs.join("run.log"), "INFO a\n").unwrap();
        fs::set_permissions(logs.join("run.log"), fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(logs.join("run.log")).is_ok() {
            // running as root, permissions are not enforced
            return;
        }

        let notifier = MockNotifier::new();
        let runner = MockRunner {
            exit_code: Some(0),
            error: None,
        };
        let report = run_and_report(&runner, &notifier, &job(&logs, StatusSource::ExitCode, None))
            .await
            .unwrap();

        assert_eq!(report.status, JobStatus::Failed);
        let sent = notifier.sent.lock().unwrap();
        assert!(sent[0].body.contains("Log directory could not be read"));
    }

    #[tokio::test]
    async fn test_log_line_count_mode() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir(&logs).unwrap();
        fs::write(logs.join("2024-01-08.log"), "INFO a\nINFO b\n").unwrap();
        let notebook = dir.path().join("deploy.ipynb");
        fs::write(&notebook, "logger.info('a')\nlogger.info('b')\n").unwrap();

        let notifier = MockNotifier::new();
        let cfg = job(&logs, StatusSource::LogLineCount, Some(notebook));
        let report = report_latest(&notifier, &cfg, None).await.unwrap();
        assert_eq!(report.status, JobStatus::Successful);
        assert!(report.outcome.is_none());
    }

    #[tokio::test]
    async fn test_report_latest_needs_exit_code() {
        let dir = tempdir().unwrap();
        let notifier = MockNotifier::new();
        let cfg = job(dir.path(), StatusSource::ExitCode, None);

        assert!(report_latest(&notifier, &cfg, None).await.is_err());
        assert!(notifier.sent.lock().unwrap().is_empty());

        let report = report_latest(&notifier, &cfg, Some(1)).await.unwrap();
        assert_eq!(report.status, JobStatus::Failed);
    }
}
