//! Email message type with a fluent builder

use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;

/// An email message
///
/// Use the builder pattern to construct messages:
///
/// ```rust
/// use petal_mailer::Email;
///
/// let email = Email::new()
///     .to("user@example.com")
///     .subject("Welcome!")
///     .text("Welcome to Petal!")
///     .html("<h1>Welcome to Petal!</h1>");
/// ```
///
/// The `from` address is optional here; transports fall back to their
/// configured sender address when it is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Email {
    /// Recipients (To)
    pub to: Vec<String>,

    /// Sender (From)
    pub from: Option<String>,

    /// Reply-To address
    pub reply_to: Option<String>,

    /// Subject line
    pub subject: Option<String>,

    /// Plain text body
    pub text: Option<String>,

    /// HTML body
    pub html: Option<String>,
}

impl Email {
    /// Create a new empty message
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipient (To)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use petal_mailer::Email;
    ///
    /// let email = Email::new().to("user@example.com");
    /// ```
    #[must_use]
    pub fn to(mut self, address: &str) -> Self {
        self.to.push(address.to_string());
        self
    }

    /// Set the sender (From)
    #[must_use]
    pub fn from(mut self, address: &str) -> Self {
        self.from = Some(address.to_string());
        self
    }

    /// Set the reply-to address
    #[must_use]
    pub fn reply_to(mut self, address: &str) -> Self {
        self.reply_to = Some(address.to_string());
        self
    }

    /// Set the subject line
    #[must_use]
    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the plain text body
    #[must_use]
    pub fn text(mut self, body: &str) -> Self {
        self.text = Some(body.to_string());
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, body: &str) -> Self {
        self.html = Some(body.to_string());
        self
    }

    /// Validate the message before handing it to a transport
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - there are no recipients, or a recipient is blank
    /// - there is no subject
    /// - there is neither a text nor an HTML body
    pub fn validate(&self) -> Result<(), DeliveryError> {
        if self.to.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }

        if let Some(blank) = self.to.iter().find(|addr| addr.trim().is_empty()) {
            return Err(DeliveryError::InvalidAddress(blank.clone()));
        }

        if self.subject.is_none() {
            return Err(DeliveryError::NoSubject);
        }

        if self.text.is_none() && self.html.is_none() {
            return Err(DeliveryError::NoContent);
        }

        Ok(())
    }
}
