// insiders-core/src/ports/notifier.rs

// What the reporting use case needs to deliver a report, without knowing
// whether it ends up in a mailbox or on a terminal.

use crate::domain::report::Notification;
use crate::error::InsidersError;
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), InsidersError>;

    /// Short label for logs ("smtp", "stdout").
    fn channel(&self) -> &str;
}
