// insiders-core/src/domain/report/status.rs

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// Pattern of a logging call-site inside the deployment notebook.
pub const LOGGING_CALL_PATTERN: &str = r"logger\.[a-z]+\(.+\)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Successful,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Successful)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the job's success signal comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    /// The job's own exit status.
    #[default]
    ExitCode,
    /// Legacy: success iff the log has one line per logging call-site of the
    /// notebook. Any change in log verbosity breaks it.
    LogLineCount,
}

/// What happened when the job ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    /// `None` when the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub fn count_logging_calls(notebook: &str) -> Result<usize, DomainError> {
    let pattern = Regex::new(LOGGING_CALL_PATTERN)?;
    Ok(pattern.find_iter(notebook).count())
}

/// Decides the report subject.
///
/// `exit_code` is the explicit signal; `log` and `notebook` are only read in
/// `LogLineCount` mode.
pub fn resolve_status(
    source: StatusSource,
    exit_code: Option<i32>,
    log: Option<&str>,
    notebook: Option<&str>,
) -> Result<JobStatus, DomainError> {
    match source {
        StatusSource::ExitCode => {
            let code = exit_code.ok_or_else(|| {
                DomainError::MissingStatusSignal("no exit code was recorded for the job".into())
            })?;
            Ok(if code == 0 {
                JobStatus::Successful
            } else {
                JobStatus::Failed
            })
        }
        StatusSource::LogLineCount => {
            let notebook = notebook.ok_or_else(|| {
                DomainError::MissingStatusSignal("no notebook to count logging calls in".into())
            })?;
            let Some(log) = log else {
                return Ok(JobStatus::Failed);
            };
            let expected = count_logging_calls(notebook)?;
            let actual = log.lines().count();
            Ok(if actual == expected {
                JobStatus::Successful
            } else {
                JobStatus::Failed
            })
        }
    }
}
