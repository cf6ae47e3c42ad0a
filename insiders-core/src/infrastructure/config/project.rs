// insiders-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["insiders_project_conf.yaml", "insiders.yaml"];

// --- LOADER ---

/// Loads and validates the project file, then layers environment overrides.
/// Without a project file the defaults apply: validation needs no setup.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project configuration");
            let content = fs::read_to_string(&config_path)?;
            serde_yaml::from_str::<ProjectConfig>(&content)?
        }
        None => {
            info!(dir = ?project_dir, "No project configuration found, using defaults");
            ProjectConfig::default()
        }
    };

    // Relative job paths are anchored on the project directory.
    if let Some(job) = config.job.as_mut() {
        job.working_dir = anchor(project_dir, &job.working_dir);
        job.log_dir = anchor(project_dir, &job.log_dir);
        job.notebook = job.notebook.as_ref().map(|p| anchor(project_dir, p));
    }

    // Pattern 'Layering': INSIDERS_STRICT_SCHEMA=true insiders validate ...
    apply_env_overrides(&mut config)?;

    config.validate()?;
    Ok(config)
}

pub fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn apply_env_overrides(config: &mut ProjectConfig) -> Result<(), InfrastructureError> {
    if let Ok(val) = std::env::var("INSIDERS_STRICT_SCHEMA") {
        let strict = parse_flag(&val).ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "INSIDERS_STRICT_SCHEMA must be true or false, got '{}'",
                val
            ))
        })?;
        info!(old = config.validation.strict_schema, new = strict, "Overriding strict_schema via ENV");
        config.validation.strict_schema = strict;
    }
    if let Ok(val) = std::env::var("INSIDERS_LOG_DIR")
        && let Some(job) = config.job.as_mut()
    {
        info!(old = ?job.log_dir, new = ?val, "Overriding log dir via ENV");
        job.log_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("INSIDERS_SMTP_PASSWORD")
        && let Some(notification) = config.notification.as_mut()
    {
        notification.smtp_password = Some(val);
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
