//! Resend mailer implementation
//!
//! Sends passcode messages through the Resend transactional email API.
//! One send attempt per issuance; the issuer treats a failed send as
//! non-fatal, so there is no retry layer here.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use gu_core::errors::DomainError;
use gu_core::services::otp::traits::MailSender;
use gu_shared::config::EmailConfig;
use gu_shared::utils::validation::mask_email;

use crate::InfrastructureError;

/// Resend API configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API base URL
    pub api_url: String,
    /// API key
    pub api_key: String,
    /// Sender address shown to recipients
    pub from_address: String,
    /// Subject line for passcode messages
    pub subject: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&EmailConfig> for ResendConfig {
    fn from(config: &EmailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            subject: config.passcode_subject.clone(),
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Mail sender backed by the Resend HTTP API
pub struct ResendMailer {
    client: reqwest::Client,
    config: ResendConfig,
}

impl ResendMailer {
    /// Create a new mailer
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "RESEND_API_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(from = %config.from_address, "Resend mailer initialized");

        Ok(Self { client, config })
    }

    fn message_body(code: &str) -> String {
        format!(
            "<p>Your Grade Up verification code is:</p>\
             <p style=\"font-size:24px;font-weight:bold;letter-spacing:4px\">{}</p>\
             <p>The code expires in 10 minutes. If you did not request it, you can ignore this email.</p>",
            code
        )
    }
}

#[async_trait]
impl MailSender for ResendMailer {
    async fn send_passcode(&self, email: &str, code: &str) -> Result<String, DomainError> {
        let url = format!("{}/emails", self.config.api_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.from_address,
                "to": [email],
                "subject": self.config.subject,
                "html": Self::message_body(code),
            }))
            .send()
            .await
            .map_err(|e| DomainError::Delivery {
                message: format!("request to mail provider failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                email = %mask_email(email),
                status = %status,
                "Mail provider rejected the message"
            );
            return Err(DomainError::Delivery {
                message: format!("mail provider returned {}: {}", status, body),
            });
        }

        let parsed: SendResponse =
            response.json().await.map_err(|e| DomainError::Delivery {
                message: format!("malformed mail provider response: {}", e),
            })?;

        tracing::info!(
            email = %mask_email(email),
            delivery_id = %parsed.id,
            "Passcode email accepted by Resend"
        );

        Ok(parsed.id)
    }
}
