//! Transactional email.
//!
//! `EmailSender` (see `crate::ports`) has two implementations: SMTP through
//! lettre, and a noop sender used when no relay is configured.

mod noop;
mod smtp;
pub mod templates;

pub use noop::NoopEmailSender;
pub use smtp::SmtpEmailSender;

use crate::ports::EmailSender;

/// Tells an account holder that their password has just changed.
/// Delivery failures are logged and not returned.
pub async fn send_reset_email(sender: &dyn EmailSender, recipient: &str) {
    let message = templates::reset_password(recipient);
    if let Err(e) = sender.send(&message).await {
        tracing::warn!(recipient = %recipient, error = %e, "Reset password email was not delivered");
    }
}

/// Sends the donation receipt. Failures are logged and not returned.
pub async fn send_donation_email(sender: &dyn EmailSender, recipient: &str, amount: i32) {
    let message = templates::donation_receipt(recipient, amount);
    if let Err(e) = sender.send(&message).await {
        tracing::warn!(recipient = %recipient, error = %e, "Donation email was not delivered");
    }
}
