// insiders-core/src/infrastructure/adapters/stdout.rs

use async_trait::async_trait;

use crate::domain::report::Notification;
use crate::error::InsidersError;
use crate::ports::notifier::Notifier;

/// Prints the report instead of mailing it (dry runs, missing SMTP setup).
#[derive(Debug, Default)]
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), InsidersError> {
        println!("📨 {}", notification.subject);
        println!("{}", notification.body.trim_end());
        Ok(())
    }

    fn channel(&self) -> &str {
        "stdout"
    }
}
