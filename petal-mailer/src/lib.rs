//! Transactional email sending for the Petal platform
//!
//! This crate is the seam the rest of the platform depends on for outbound
//! account email. It provides:
//!
//! - The [`EmailSender`] capability with the three account operations
//!   (generic email, welcome email, password reset email)
//! - Concrete transports: SMTP via `lettre` ([`SmtpBackend`]) and a console
//!   transport for development ([`ConsoleBackend`])
//! - A recording fake for tests ([`testing::MockEmailSender`])
//! - Layered configuration ([`MailerConfig`])
//!
//! Every operation is asynchronous and safe to invoke concurrently; each
//! send results in exactly one transport submission, with no retry and no
//! queuing at this layer. Calling workflows own the policy for failures
//! (registration logs and continues, password reset treats them as fatal).
//!
//! # Examples
//!
//! ## Sending through the configured transport
//!
//! ```rust,no_run
//! use petal_mailer::{EmailSender, MailerConfig};
//!
//! # async fn example() -> Result<(), petal_mailer::DeliveryError> {
//! let mailer = MailerConfig::load()?.sender()?;
//!
//! mailer
//!     .send_email(
//!         "user@example.com",
//!         "Your order has shipped",
//!         "<p>Your order is on its way.</p>",
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Substituting a fake in tests
//!
//! ```rust
//! use petal_mailer::testing::MockEmailSender;
//! use petal_mailer::EmailSender;
//!
//! # async fn example() -> Result<(), petal_mailer::DeliveryError> {
//! let mock = MockEmailSender::new();
//!
//! mock.send_welcome_email("alice@example.com", "alice").await?;
//!
//! assert!(mock.was_sent_to("alice@example.com"));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
mod content;
pub mod error;
pub mod message;
pub mod sender;
pub mod testing;

pub use backend::{ConsoleBackend, SmtpBackend, SmtpConfig};
pub use config::{BackendKind, MailerConfig};
pub use error::DeliveryError;
pub use message::Email;
pub use sender::EmailSender;
