use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Message},
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};

use crate::ports::{EmailMessage, EmailSender, NotificationError};

/// Wraps `AsyncSmtpTransport<Tokio1Executor>`; connects without TLS to a local relay.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailSender {
    pub fn new(host: &str, port: u16, from_address: String) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            from_address,
        }
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| NotificationError::SendFailed(format!("invalid sender address: {}", e)))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("invalid recipient address: {}", e)))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| NotificationError::SendFailed(format!("could not build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP send failed: {}", e)))?;

        Ok(())
    }
}
