use async_trait::async_trait;

use crate::ports::{EmailMessage, EmailSender, NotificationError};

/// Drops every message after logging it. Used when SMTP_HOST is unset.
#[derive(Debug, Default, Clone)]
pub struct NoopEmailSender;

#[async_trait]
impl EmailSender for NoopEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        tracing::debug!(to = %message.to, subject = %message.subject, "Email skipped (noop sender)");
        Ok(())
    }
}
