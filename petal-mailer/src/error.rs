//! Email delivery error types

use thiserror::Error;

/// Errors that can occur when sending email
///
/// Validation variants (`NoRecipients`, `NoSubject`, `NoContent`,
/// `InvalidAddress`) describe permanently invalid input; `Smtp` covers
/// transport failures a caller may choose to retry at its own layer.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Message has no recipients
    #[error("email must have at least one recipient")]
    NoRecipients,

    /// Message has no subject
    #[error("email must have a subject")]
    NoSubject,

    /// Message has no body content
    #[error("email must have either text or HTML content")]
    NoContent,

    /// Invalid email address format
    #[error("invalid email address: {0:?}")]
    InvalidAddress(String),

    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(String),

    /// Mailer configuration error
    #[error("mailer configuration error: {0}")]
    Config(String),
}

impl DeliveryError {
    /// Create an SMTP error from a string message
    #[must_use]
    pub fn smtp<T: Into<String>>(msg: T) -> Self {
        Self::Smtp(msg.into())
    }

    /// Create a configuration error from a string message
    #[must_use]
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}
