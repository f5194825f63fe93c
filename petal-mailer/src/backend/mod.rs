//! Concrete email transports

mod console;
mod smtp;

pub use console::ConsoleBackend;
pub use smtp::{SmtpBackend, SmtpConfig};
