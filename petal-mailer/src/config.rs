//! Mailer configuration
//!
//! Configuration is loaded from layered sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MAILER_` prefix, `__` for
//!    nesting)
//! 2. `./mailer.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # mailer.toml
//! backend = "smtp"
//!
//! [smtp]
//! host = "smtp.example.com"
//! port = 587
//! username = "mailer"
//! password = "secret"
//! use_tls = true
//! from = "no-reply@example.com"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use petal_mailer::MailerConfig;
//!
//! # fn example() -> Result<(), petal_mailer::DeliveryError> {
//! let config = MailerConfig::load()?;
//! let mailer = config.sender()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::backend::{ConsoleBackend, SmtpBackend, SmtpConfig};
use crate::error::DeliveryError;
use crate::sender::EmailSender;

/// Which transport delivers outgoing mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Deliver over SMTP
    Smtp,

    /// Print to stdout (development)
    Console,
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::Console
    }
}

/// Complete mailer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    /// Transport selection
    pub backend: BackendKind,

    /// SMTP transport settings
    pub smtp: SmtpConfig,
}

impl MailerConfig {
    /// Load configuration from `./mailer.toml` and `MAILER_*` environment
    /// variables
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Config` if a source cannot be read or a value
    /// cannot be parsed
    pub fn load() -> Result<Self, DeliveryError> {
        Self::load_from("mailer.toml")
    }

    /// Load configuration from a specific TOML file
    ///
    /// The file is optional; missing files leave the defaults in place.
    /// Environment variables still take precedence.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Config` if a source cannot be read or a value
    /// cannot be parsed
    pub fn load_from(path: &str) -> Result<Self, DeliveryError> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| DeliveryError::config(e.to_string()))?;

        Figment::new()
            .merge(Toml::string(&defaults))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MAILER_").split("__"))
            .extract()
            .map_err(|e| DeliveryError::config(e.to_string()))
    }

    /// Build the configured transport
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the SMTP transport cannot be constructed
    /// from the configuration
    pub fn sender(&self) -> Result<Arc<dyn EmailSender>, DeliveryError> {
        match self.backend {
            BackendKind::Smtp => Ok(Arc::new(SmtpBackend::new(self.smtp.clone())?)),
            BackendKind::Console => Ok(Arc::new(ConsoleBackend::new())),
        }
    }
}
