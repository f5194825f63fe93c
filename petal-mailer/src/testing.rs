//! Testing utilities
//!
//! A recording transport for exercising email flows in tests without
//! network I/O.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::message::Email;
use crate::sender::EmailSender;

/// Mock email transport for tests
///
/// Captures delivered messages in memory for assertions, counts delivery
/// attempts, and can be armed to fail like a rejecting relay. Cloning is
/// cheap and clones share the same recording buffer.
///
/// # Examples
///
/// ```rust
/// use petal_mailer::testing::MockEmailSender;
/// use petal_mailer::EmailSender;
///
/// # async fn example() -> Result<(), petal_mailer::DeliveryError> {
/// let mock = MockEmailSender::new();
///
/// mock.send_welcome_email("user@example.com", "user").await?;
///
/// assert_eq!(mock.sent_count(), 1);
/// assert!(mock.was_sent_to("user@example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<Email>>>,
    attempts: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockEmailSender {
    /// Create a new mock transport
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the mock to fail every delivery with an SMTP-style error
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    pub fn fail_with<T: Into<String>>(&self, reason: T) {
        *self.failure.lock().unwrap() = Some(reason.into());
    }

    /// Let deliveries succeed again
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Number of messages successfully delivered
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Number of delivery attempts, including failed ones
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// All delivered messages
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn sent_emails(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    /// Clear all recorded messages and the attempt counter
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.attempts.store(0, Ordering::SeqCst);
    }

    /// Check whether a message was delivered to a specific address
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|email| email.to.iter().any(|to| to == address))
    }

    /// Check whether a message was delivered with a specific subject
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn was_sent_with_subject(&self, subject: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|email| email.subject.as_deref() == Some(subject))
    }

    /// The most recently delivered message
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn last_sent(&self) -> Option<Email> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// The first delivered message
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (should never happen in tests)
    #[must_use]
    pub fn first_sent(&self) -> Option<Email> {
        self.sent.lock().unwrap().first().cloned()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn deliver(&self, email: Email) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        email.validate()?;

        if let Some(reason) = self.failure.lock().unwrap().clone() {
            return Err(DeliveryError::smtp(reason));
        }

        self.sent.lock().unwrap().push(email);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_delivered_messages() {
        let mock = MockEmailSender::new();

        let email = Email::new()
            .to("user@example.com")
            .subject("Test")
            .text("Hello");

        mock.deliver(email).await.unwrap();

        assert_eq!(mock.sent_count(), 1);
        assert!(mock.was_sent_to("user@example.com"));
        assert!(mock.was_sent_with_subject("Test"));
    }

    #[tokio::test]
    async fn records_in_order() {
        let mock = MockEmailSender::new();

        for i in 0..5 {
            let email = Email::new()
                .to(&format!("user{i}@example.com"))
                .subject(&format!("Test {i}"))
                .text("Hello");

            mock.deliver(email).await.unwrap();
        }

        assert_eq!(mock.sent_count(), 5);
        assert_eq!(
            mock.first_sent().unwrap().to,
            vec!["user0@example.com".to_string()]
        );
        assert_eq!(
            mock.last_sent().unwrap().to,
            vec!["user4@example.com".to_string()]
        );
    }

    #[tokio::test]
    async fn clear_resets_state() {
        let mock = MockEmailSender::new();

        let email = Email::new()
            .to("user@example.com")
            .subject("Test")
            .text("Hello");

        mock.deliver(email).await.unwrap();
        assert_eq!(mock.sent_count(), 1);
        assert_eq!(mock.attempt_count(), 1);

        mock.clear();
        assert_eq!(mock.sent_count(), 0);
        assert_eq!(mock.attempt_count(), 0);
    }

    #[tokio::test]
    async fn invalid_message_counts_as_attempt_but_not_sent() {
        let mock = MockEmailSender::new();

        // no subject
        let email = Email::new().to("user@example.com").text("Hello");

        assert!(mock.deliver(email).await.is_err());
        assert_eq!(mock.attempt_count(), 1);
        assert_eq!(mock.sent_count(), 0);
    }

    #[tokio::test]
    async fn armed_failure_rejects_deliveries() {
        let mock = MockEmailSender::new();
        mock.fail_with("550 mailbox unavailable");

        let email = Email::new()
            .to("user@example.com")
            .subject("Test")
            .text("Hello");

        let result = mock.deliver(email.clone()).await;
        assert!(matches!(result, Err(DeliveryError::Smtp(_))));
        assert_eq!(mock.sent_count(), 0);

        mock.clear_failure();
        mock.deliver(email).await.unwrap();
        assert_eq!(mock.sent_count(), 1);
    }
}
