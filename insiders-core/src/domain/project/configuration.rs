// insiders-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

use crate::domain::report::StatusSource;
use crate::domain::validation::PipelineOptions;

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobConfig>,

    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            validation: ValidationConfig::default(),
            job: None,
            notification: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct ValidationConfig {
    #[serde(default)]
    pub strict_schema: bool,
}

impl From<ValidationConfig> for PipelineOptions {
    fn from(cfg: ValidationConfig) -> Self {
        PipelineOptions {
            strict_schema: cfg.strict_schema,
        }
    }
}

/// The weekly model job and where it leaves its logs.
#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
#[validate(schema(function = "validate_status_source"))]
pub struct JobConfig {
    #[validate(length(min = 1, message = "Job command cannot be empty"))]
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub status_source: StatusSource,

    /// Deployment notebook, read in `log_line_count` mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct NotificationConfig {
    #[validate(email(message = "Sender must be an email address"))]
    pub sender: String,

    #[validate(email(message = "Recipient must be an email address"))]
    pub recipient: String,

    #[validate(length(min = 1))]
    pub smtp_host: String,

    #[validate(range(min = 1))]
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,

    /// Never read from the file; filled from `INSIDERS_SMTP_PASSWORD`.
    #[serde(skip)]
    pub smtp_password: Option<String>,
}

fn validate_status_source(job: &JobConfig) -> Result<(), ValidationError> {
    if job.status_source == StatusSource::LogLineCount && job.notebook.is_none() {
        let mut err = ValidationError::new("notebook_required");
        err.message = Some("log_line_count needs a 'notebook' to count logging calls in".into());
        return Err(err);
    }
    Ok(())
}

fn default_name() -> String {
    "insiders".to_string()
}
fn default_version() -> String {
    "1.0".to_string()
}
fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_smtp_port() -> u16 {
    465
}
