// insiders-core/src/domain/report/notification.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::status::JobStatus;

pub const SUBJECT_PREFIX: &str = "Insiders log";

/// Most recent file of the job's log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub content: String,
}

impl LogFile {
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Builds the weekly report: the status goes in the subject, the whole log in the body.
pub fn compose_report(status: JobStatus, log: Option<&LogFile>) -> Notification {
    let body = match log {
        Some(log) => log.content.clone(),
        None => "No log file was found for this run.\n".to_string(),
    };

    Notification {
        subject: format!("{}: {}", SUBJECT_PREFIX, status),
        body,
    }
}
