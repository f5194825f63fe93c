//! SMTP transport
//!
//! Uses the `lettre` crate to send email through an SMTP relay.

use async_trait::async_trait;
use lettre::{
    message::{header, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DeliveryError;
use crate::message::Email;
use crate::sender::EmailSender;

/// SMTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,

    /// SMTP server port (usually 587 for STARTTLS)
    pub port: u16,

    /// SMTP username; leave empty for unauthenticated local servers
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Use STARTTLS; disable for local development servers such as Mailpit
    pub use_tls: bool,

    /// Sender address applied when a message carries no explicit From
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            use_tls: true,
            from: "no-reply@localhost".to_string(),
        }
    }
}

impl SmtpConfig {
    /// Create SMTP configuration from environment variables
    ///
    /// Reads the following variables:
    /// - `SMTP_HOST`: SMTP server hostname (required)
    /// - `SMTP_PORT`: SMTP server port (default: 587)
    /// - `SMTP_USERNAME`: SMTP username (default: empty, no authentication)
    /// - `SMTP_PASSWORD`: SMTP password (default: empty)
    /// - `SMTP_USE_TLS`: use STARTTLS (default: true)
    /// - `SMTP_FROM`: sender address (required)
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Config` if a required variable is missing or
    /// a value cannot be parsed
    pub fn from_env() -> Result<Self, DeliveryError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| DeliveryError::config("SMTP_HOST environment variable not set"))?;

        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| DeliveryError::config("SMTP_PORT must be a valid port number"))?;

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();

        let use_tls = std::env::var("SMTP_USE_TLS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let from = std::env::var("SMTP_FROM")
            .map_err(|_| DeliveryError::config("SMTP_FROM environment variable not set"))?;

        Ok(Self {
            host,
            port,
            username,
            password,
            use_tls,
            from,
        })
    }
}

/// SMTP email transport
///
/// Sends email via SMTP using the `lettre` crate. The underlying connection
/// pool is created once at construction and reused for every delivery; it is
/// safe to share across tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use petal_mailer::{EmailSender, SmtpBackend};
///
/// # async fn example() -> Result<(), petal_mailer::DeliveryError> {
/// let mailer = SmtpBackend::from_env()?;
///
/// mailer
///     .send_email(
///         "user@example.com",
///         "Your order has shipped",
///         "<p>Your order is on its way.</p>",
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SmtpBackend {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpBackend {
    /// Create a new SMTP transport with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Smtp` if the relay cannot be set up (for
    /// example, invalid TLS parameters for the configured host)
    pub fn new(config: SmtpConfig) -> Result<Self, DeliveryError> {
        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| DeliveryError::smtp(e.to_string()))?
        } else {
            // Plain connection, for local development servers only.
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Create a new SMTP transport from `SMTP_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Config` if required environment variables are
    /// missing
    pub fn from_env() -> Result<Self, DeliveryError> {
        Self::new(SmtpConfig::from_env()?)
    }

    /// Map an [`Email`] to a lettre [`Message`]
    fn build_message(&self, email: &Email) -> Result<Message, DeliveryError> {
        email.validate()?;

        let from_addr = email.from.as_deref().unwrap_or(&self.config.from);
        let from: Mailbox = from_addr
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(from_addr.to_string()))?;

        let mut builder = Message::builder().from(from);

        for to_addr in &email.to {
            let to: Mailbox = to_addr
                .parse()
                .map_err(|_| DeliveryError::InvalidAddress(to_addr.clone()))?;
            builder = builder.to(to);
        }

        if let Some(reply_to_addr) = &email.reply_to {
            let reply_to: Mailbox = reply_to_addr
                .parse()
                .map_err(|_| DeliveryError::InvalidAddress(reply_to_addr.clone()))?;
            builder = builder.reply_to(reply_to);
        }

        let subject = email.subject.as_ref().ok_or(DeliveryError::NoSubject)?;
        builder = builder.subject(subject.clone());

        let message = if let (Some(html), Some(text)) = (&email.html, &email.text) {
            builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_PLAIN)
                                .body(text.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_HTML)
                                .body(html.clone()),
                        ),
                )
                .map_err(|e| DeliveryError::smtp(e.to_string()))?
        } else if let Some(html) = &email.html {
            builder
                .header(header::ContentType::TEXT_HTML)
                .body(html.clone())
                .map_err(|e| DeliveryError::smtp(e.to_string()))?
        } else if let Some(text) = &email.text {
            builder
                .header(header::ContentType::TEXT_PLAIN)
                .body(text.clone())
                .map_err(|e| DeliveryError::smtp(e.to_string()))?
        } else {
            return Err(DeliveryError::NoContent);
        };

        Ok(message)
    }
}

#[async_trait]
impl EmailSender for SmtpBackend {
    async fn deliver(&self, email: Email) -> Result<(), DeliveryError> {
        let message = self.build_message(&email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::smtp(e.to_string()))?;

        debug!(to = ?email.to, "message accepted by SMTP relay");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_backend() -> SmtpBackend {
        SmtpBackend::new(SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            use_tls: false,
            from: "no-reply@petal.test".to_string(),
            ..SmtpConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn config_from_env() {
        // Set and read sequentially within one test; parallel tests must not
        // touch SMTP_* variables.
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::set_var("SMTP_PORT", "2525");
        std::env::set_var("SMTP_USERNAME", "mailer");
        std::env::set_var("SMTP_PASSWORD", "hunter2");
        std::env::set_var("SMTP_USE_TLS", "false");
        std::env::set_var("SMTP_FROM", "no-reply@example.com");

        let config = SmtpConfig::from_env().unwrap();
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 2525);
        assert_eq!(config.username, "mailer");
        assert_eq!(config.password, "hunter2");
        assert!(!config.use_tls);
        assert_eq!(config.from, "no-reply@example.com");

        std::env::remove_var("SMTP_PORT");
        std::env::remove_var("SMTP_USE_TLS");
        std::env::remove_var("SMTP_USERNAME");
        std::env::remove_var("SMTP_PASSWORD");

        let config = SmtpConfig::from_env().unwrap();
        assert_eq!(config.port, 587);
        assert!(config.use_tls);
        assert!(config.username.is_empty());

        std::env::remove_var("SMTP_HOST");
        assert!(SmtpConfig::from_env().is_err());

        std::env::remove_var("SMTP_FROM");
    }

    #[tokio::test]
    async fn build_message_simple() {
        let email = Email::new()
            .to("recipient@example.com")
            .subject("Test")
            .text("This is a test email");

        assert!(local_backend().build_message(&email).is_ok());
    }

    #[tokio::test]
    async fn build_message_multipart() {
        let email = Email::new()
            .to("recipient@example.com")
            .subject("Test")
            .text("plain")
            .html("<h1>rich</h1>");

        assert!(local_backend().build_message(&email).is_ok());
    }

    #[tokio::test]
    async fn build_message_fills_default_from() {
        // No explicit From on the message; the configured sender is used.
        let email = Email::new()
            .to("recipient@example.com")
            .subject("Test")
            .text("body");

        assert!(local_backend().build_message(&email).is_ok());
    }

    #[tokio::test]
    async fn build_message_rejects_bad_recipient() {
        let email = Email::new()
            .to("not-an-address")
            .subject("Test")
            .text("body");

        assert!(matches!(
            local_backend().build_message(&email),
            Err(DeliveryError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn plain_connection_backend_builds() {
        // builder_dangerous performs no network I/O at construction time.
        let _ = local_backend();
    }
}
