// insiders/src/commands/mod.rs

pub mod job;
pub mod report;
pub mod schema;
pub mod validate;

use insiders_core::domain::project::ProjectConfig;
use insiders_core::infrastructure::adapters::{SmtpNotifier, StdoutNotifier};
use insiders_core::ports::Notifier;

/// SMTP when the project configures it, stdout otherwise or on dry runs.
pub(crate) fn select_notifier(config: &ProjectConfig, dry_run: bool) -> Box<dyn Notifier> {
    match (&config.notification, dry_run) {
        (Some(notification), false) => Box::new(SmtpNotifier::new(notification.clone())),
        _ => {
            if !dry_run {
                tracing::warn!("No notification section configured, printing the report");
            }
            Box::new(StdoutNotifier)
        }
    }
}
