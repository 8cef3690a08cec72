//! Mock mailer implementation
//!
//! Logs passcode messages to the console instead of sending them. The
//! only place in the system where a raw passcode may reach a log.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use gu_core::errors::DomainError;
use gu_core::services::otp::traits::MailSender;
use gu_shared::utils::validation::mask_email;

/// Console mailer for development and testing
#[derive(Clone, Default)]
pub struct MockMailer {
    /// Counter for messages "sent"
    message_count: Arc<AtomicU64>,
    /// Messages captured for assertions: (recipient, code)
    sent: Arc<Mutex<Vec<(String, String)>>>,
    /// Whether to simulate delivery failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Total messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Captured messages, in send order
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailSender for MockMailer {
    async fn send_passcode(&self, email: &str, code: &str) -> Result<String, DomainError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            tracing::warn!(
                email = %mask_email(email),
                "Mock mailer simulating delivery failure"
            );
            return Err(DomainError::Delivery {
                message: "simulated delivery failure".to_string(),
            });
        }

        let delivery_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));

        // Development convenience: the code is printed so local signup
        // can proceed without a mail provider.
        println!("== MOCK MAIL #{} to {}: your code is {} ==", count, email, code);

        tracing::info!(
            target: "mail_sender",
            provider = "mock",
            email = %mask_email(email),
            delivery_id = %delivery_id,
            "Passcode email sent (mock)"
        );

        Ok(delivery_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_success() {
        let mailer = MockMailer::new();
        let result = mailer.send_passcode("a@x.com", "1234").await;

        assert!(result.unwrap().starts_with("mock_"));
        assert_eq!(mailer.message_count(), 1);
        assert_eq!(
            mailer.sent_messages(),
            vec![("a@x.com".to_string(), "1234".to_string())]
        );
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let mailer = MockMailer::new();
        mailer.set_simulate_failure(true);

        let result = mailer.send_passcode("a@x.com", "1234").await;
        assert!(matches!(result, Err(DomainError::Delivery { .. })));
        assert_eq!(mailer.message_count(), 0);
    }
}
