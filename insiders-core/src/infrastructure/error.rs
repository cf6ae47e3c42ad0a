// insiders-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum NotificationError {
    #[error("SMTP Transport Error: {0}")]
    #[diagnostic(
        code(insiders::infra::smtp),
        help("Check the SMTP host, port and INSIDERS_SMTP_PASSWORD.")
    )]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email Address Error: {0}")]
    #[diagnostic(code(insiders::infra::smtp::address))]
    Address(#[from] lettre::address::AddressError),

    #[error("Email Build Error: {0}")]
    #[diagnostic(code(insiders::infra::smtp::build))]
    Build(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- NOTIFICATIONS (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Notification(#[from] NotificationError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(insiders::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(insiders::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(insiders::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(insiders::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(insiders::infra::config_invalid),
        help("Fix the fields listed above in insiders.yaml.")
    )]
    InvalidConfig(#[from] validator::ValidationErrors),
}

// Manual implementation for shortcuts (e.g. `?` on lettre calls)
impl From<lettre::transport::smtp::Error> for InfrastructureError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        InfrastructureError::Notification(NotificationError::Transport(err))
    }
}
