//! Console transport for development
//!
//! Prints messages to stdout instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::error::DeliveryError;
use crate::message::Email;
use crate::sender::EmailSender;

/// Console email transport for development
///
/// Writes the message to stdout instead of delivering it over the network,
/// so account flows can be exercised without SMTP credentials. Stdout is the
/// delivery medium here; log records still carry metadata only.
///
/// # Examples
///
/// ```rust,no_run
/// use petal_mailer::{ConsoleBackend, EmailSender};
///
/// # async fn example() -> Result<(), petal_mailer::DeliveryError> {
/// let mailer = ConsoleBackend::new();
///
/// mailer.send_welcome_email("user@example.com", "user").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleBackend;

impl ConsoleBackend {
    /// Create a new console transport
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for ConsoleBackend {
    async fn deliver(&self, email: Email) -> Result<(), DeliveryError> {
        email.validate()?;

        let subject = email.subject.as_deref().unwrap_or_default();

        info!(to = ?email.to, subject = %subject, "console email delivered");

        println!("==== console email =======================");
        println!("To:       {}", email.to.join(", "));
        if let Some(from) = &email.from {
            println!("From:     {from}");
        }
        if let Some(reply_to) = &email.reply_to {
            println!("Reply-To: {reply_to}");
        }
        println!("Subject:  {subject}");
        if let Some(text) = &email.text {
            println!("---- text --------------------------------");
            println!("{text}");
        }
        if let Some(html) = &email.html {
            println!("---- html --------------------------------");
            println!("{html}");
        }
        println!("==========================================");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_valid_message() {
        let backend = ConsoleBackend::new();

        let email = Email::new()
            .to("user@example.com")
            .subject("Test")
            .text("This is a test email");

        assert!(backend.deliver(email).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_invalid_message() {
        let backend = ConsoleBackend::new();

        let email = Email::new().to("user@example.com").text("no subject");

        assert!(matches!(
            backend.deliver(email).await,
            Err(DeliveryError::NoSubject)
        ));
    }
}
