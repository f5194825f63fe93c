//! Email sender trait abstraction
//!
//! Defines the `EmailSender` capability that all transports implement and
//! that the rest of the platform depends on.

use async_trait::async_trait;
use tracing::debug;

use crate::content;
use crate::error::DeliveryError;
use crate::message::Email;

/// Trait for sending emails
///
/// Implemented by all transports (SMTP, console, the recording mock in
/// [`crate::testing`]). Only [`deliver`](EmailSender::deliver) is required;
/// the account flows are provided on top of it, so every transport composes
/// the same welcome and password-reset messages.
///
/// The trait is object safe and intended to be injected as
/// `Arc<dyn EmailSender>`. All operations are safe to invoke concurrently
/// from any number of call sites; no ordering is guaranteed between sends
/// that are in flight at the same time, and a send cannot be retracted once
/// invoked.
///
/// # Examples
///
/// ```rust,no_run
/// use petal_mailer::{ConsoleBackend, EmailSender};
///
/// # async fn example() -> Result<(), petal_mailer::DeliveryError> {
/// let mailer = ConsoleBackend::new();
///
/// mailer.send_welcome_email("alice@example.com", "alice").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a fully built message
    ///
    /// One transport submission per call; implementations validate the
    /// message and do not retry on failure. "Delivered" means the transport
    /// accepted the message; no queued/delivered distinction is made.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message is invalid or the transport
    /// cannot send it
    async fn deliver(&self, email: Email) -> Result<(), DeliveryError>;

    /// Send a generic transactional email with an HTML body
    ///
    /// The recipient, subject and body reach the transport unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message is invalid or the transport
    /// cannot send it
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DeliveryError> {
        debug!(to = %to, subject = %subject, "sending email");

        let email = Email::new().to(to).subject(subject).html(body);
        self.deliver(email).await
    }

    /// Send the welcome email for a newly registered account
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message cannot be sent. Callers in the
    /// registration flow typically log this and continue; the account is
    /// already created.
    async fn send_welcome_email(
        &self,
        to: &str,
        username: &str,
    ) -> Result<(), DeliveryError> {
        debug!(to = %to, username = %username, "sending welcome email");

        self.deliver(content::welcome(username).to(to)).await
    }

    /// Send the password reset email carrying the reset token
    ///
    /// The token is an opaque, sensitive credential: it goes into the
    /// message body and nowhere else. Issuance, expiry and single-use
    /// semantics belong to the component that minted it.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message cannot be sent. The reset flow
    /// cannot proceed without the token reaching the user, so callers treat
    /// this as fatal to the request.
    async fn send_password_reset_email(
        &self,
        to: &str,
        reset_token: &str,
        username: &str,
    ) -> Result<(), DeliveryError> {
        debug!(to = %to, username = %username, "sending password reset email");

        self.deliver(content::password_reset(reset_token, username).to(to))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEmailSender;

    #[tokio::test]
    async fn send_email_delivers_exactly_once() {
        let mock = MockEmailSender::new();

        mock.send_email("user@example.com", "Subject", "<p>Body</p>")
            .await
            .unwrap();

        assert_eq!(mock.attempt_count(), 1);
        assert_eq!(mock.sent_count(), 1);
    }

    #[tokio::test]
    async fn welcome_email_goes_to_the_recipient() {
        let mock = MockEmailSender::new();

        mock.send_welcome_email("alice@example.com", "alice")
            .await
            .unwrap();

        assert!(mock.was_sent_to("alice@example.com"));
    }

    #[tokio::test]
    async fn password_reset_email_body_carries_the_token() {
        let mock = MockEmailSender::new();

        mock.send_password_reset_email("bob@example.com", "tok-1234abcd", "bob")
            .await
            .unwrap();

        let sent = mock.last_sent().unwrap();
        assert!(sent.html.unwrap().contains("tok-1234abcd"));
    }
}
