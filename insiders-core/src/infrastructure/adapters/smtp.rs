// insiders-core/src/infrastructure/adapters/smtp.rs

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::domain::project::NotificationConfig;
use crate::domain::report::Notification;
use crate::error::InsidersError;
use crate::infrastructure::error::{InfrastructureError, NotificationError};
use crate::ports::notifier::Notifier;

/// Port 465 speaks TLS from the first byte; anything else upgrades with STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpNotifier {
    config: NotificationConfig,
}

impl SmtpNotifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        Message::builder()
            .from(self.config.sender.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotificationError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let builder = if self.config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
        };
        let mut builder = builder.port(self.config.smtp_port);

        let user = self
            .config
            .smtp_user
            .clone()
            .unwrap_or_else(|| self.config.sender.clone());
        if let Some(password) = &self.config.smtp_password {
            builder = builder.credentials(Credentials::new(user, password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), InsidersError> {
        let message = self
            .build_message(notification)
            .map_err(InfrastructureError::from)?;
        let mailer = self.transport().map_err(InfrastructureError::from)?;

        mailer.send(message).await.map_err(InfrastructureError::from)?;

        info!(to = %self.config.recipient, subject = %notification.subject, "Report email sent");
        Ok(())
    }

    fn channel(&self) -> &str {
        "smtp"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(sender: &str) -> NotificationConfig {
        NotificationConfig {
            sender: sender.into(),
            recipient: "manager@example.com".into(),
            smtp_host: "smtp.example.com".into(),
            smtp_port: 465,
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[test]
    fn test_build_message() {
        let notifier = SmtpNotifier::new(config("reports@example.com"));
        let notification = Notification {
            subject: "Insiders log: SUCCESSFUL".into(),
            body: "INFO done\n".into(),
        };
        let message = notifier.build_message(&notification).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Insiders log: SUCCESSFUL"));
        assert!(raw.contains("To: manager@example.com"));
    }

    #[test]
    fn test_bad_sender_address() {
        let notifier = SmtpNotifier::new(config("not-an-email"));
        let notification = Notification {
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(matches!(
            notifier.build_message(&notification),
            Err(NotificationError::Address(_))
        ));
    }

    #[test]
    fn test_channel() {
        assert_eq!(SmtpNotifier::new(config("a@example.com")).channel(), "smtp");
    }
}
