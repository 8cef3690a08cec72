//! GoTrue identity provider client
//!
//! Talks to a GoTrue-compatible auth API: admin user creation with a
//! service-role key, and password-grant sign-in with the public key.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use gu_core::domain::value_objects::account::Account;
use gu_core::errors::DomainError;
use gu_core::services::otp::traits::IdentityProvider;
use gu_shared::config::IdentityConfig;
use gu_shared::utils::validation::mask_email;

use crate::InfrastructureError;

/// GoTrue client configuration
#[derive(Debug, Clone)]
pub struct GoTrueConfig {
    /// API base URL
    pub base_url: String,
    /// Service-role key for admin operations
    pub service_role_key: String,
    /// Public key for the sign-in endpoint
    pub anon_key: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&IdentityConfig> for GoTrueConfig {
    fn from(config: &IdentityConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            service_role_key: config.service_role_key.clone(),
            anon_key: config.anon_key.clone(),
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

/// Identity provider backed by a GoTrue-compatible HTTP API
pub struct GoTrueIdentityProvider {
    client: reqwest::Client,
    config: GoTrueConfig,
}

impl GoTrueIdentityProvider {
    /// Create a new client
    pub fn new(config: GoTrueConfig) -> Result<Self, InfrastructureError> {
        if config.service_role_key.is_empty() {
            return Err(InfrastructureError::Config(
                "IDENTITY_SERVICE_ROLE_KEY not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(base_url = %config.base_url, "Identity provider client initialized");

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Pull a human-readable message out of a GoTrue error body
    fn error_message(body: &Value, fallback: &str) -> String {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(message) = body.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
        fallback.to_string()
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Account, DomainError> {
        let response = self
            .client
            .post(self.endpoint("/admin/users"))
            .bearer_auth(&self.config.service_role_key)
            .json(&json!({
                "email": email,
                "password": password,
                // The passcode already proved ownership of the address
                "email_confirm": true,
                "user_metadata": { "full_name": full_name },
            }))
            .send()
            .await
            .map_err(|e| DomainError::AccountCreation {
                message: format!("request to identity provider failed: {}", e),
            })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = Self::error_message(&body, "account creation rejected");
            tracing::warn!(
                email = %mask_email(email),
                status = %status,
                "Identity provider rejected account creation"
            );
            return Err(DomainError::AccountCreation { message });
        }

        Account::from_payload(body).ok_or_else(|| DomainError::AccountCreation {
            message: "identity provider returned an account without an id".to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Value, DomainError> {
        let response = self
            .client
            .post(self.endpoint("/token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| DomainError::AuthenticationFailed {
                message: format!("request to identity provider failed: {}", e),
            })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = Self::error_message(&body, "invalid login credentials");
            tracing::info!(
                email = %mask_email(email),
                status = %status,
                "Sign-in rejected by identity provider"
            );
            return Err(DomainError::AuthenticationFailed { message });
        }

        Ok(body)
    }
}
