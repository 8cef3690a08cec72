//! Email delivery module
//!
//! Implementations of the core `MailSender` trait:
//! - **Resend**: production delivery via the Resend HTTP API
//! - **Mock**: console output for development and testing

pub mod mock;
pub mod resend;

use async_trait::async_trait;

use gu_core::errors::DomainError;
use gu_core::services::otp::traits::MailSender;
use gu_shared::config::EmailConfig;

pub use mock::MockMailer;
pub use resend::{ResendConfig, ResendMailer};

/// Mail sender chosen at startup from configuration
pub enum MailSenderImpl {
    Resend(ResendMailer),
    Mock(MockMailer),
}

#[async_trait]
impl MailSender for MailSenderImpl {
    async fn send_passcode(&self, email: &str, code: &str) -> Result<String, DomainError> {
        match self {
            MailSenderImpl::Resend(sender) => sender.send_passcode(email, code).await,
            MailSenderImpl::Mock(sender) => sender.send_passcode(email, code).await,
        }
    }
}

/// Create a mail sender based on configuration.
///
/// Falls back to the console mailer when the HTTP client cannot be
/// constructed, so a missing provider key never blocks local startup.
pub fn create_mail_sender(config: &EmailConfig) -> MailSenderImpl {
    if config.use_mock {
        tracing::info!("Using console mailer");
        return MailSenderImpl::Mock(MockMailer::new());
    }

    match ResendMailer::new(ResendConfig::from(config)) {
        Ok(sender) => MailSenderImpl::Resend(sender),
        Err(e) => {
            tracing::error!("Failed to initialize Resend mailer: {}", e);
            tracing::warn!("Falling back to console mailer");
            MailSenderImpl::Mock(MockMailer::new())
        }
    }
}
