//! Passcode redemption and account provisioning service

use chrono::Utc;
use std::sync::Arc;

use gu_shared::utils::validation::mask_email;

use crate::domain::entities::otp::CODE_LENGTH;
use crate::domain::value_objects::account::Account;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::traits::IdentityProvider;

/// Redeems passcodes and provisions the verified account.
pub struct OtpVerifier<R: OtpRepository, I: IdentityProvider> {
    repository: Arc<R>,
    identity: Arc<I>,
}

impl<R: OtpRepository, I: IdentityProvider> OtpVerifier<R, I> {
    /// Create a new verifier
    pub fn new(repository: Arc<R>, identity: Arc<I>) -> Self {
        Self {
            repository,
            identity,
        }
    }

    /// Verify a submitted passcode and create the account.
    ///
    /// Redemption goes through the store's atomic conditional update:
    /// the newest outstanding record for the email is the only one
    /// compared, and its `verified` flag flips in the same statement.
    /// The flip happens before account creation, so a provider failure
    /// leaves the code spent; remediation is a fresh issuance.
    pub async fn verify(
        &self,
        email: &str,
        code: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> DomainResult<Account> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::Validation {
                message: "email is required".to_string(),
            });
        }
        if password.is_empty() {
            return Err(DomainError::Validation {
                message: "password is required".to_string(),
            });
        }
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation {
                message: format!("code must be exactly {} digits", CODE_LENGTH),
            });
        }

        let record = self
            .repository
            .redeem_newest(email, code, Utc::now())
            .await?
            .ok_or(DomainError::InvalidOrExpiredCode)?;

        tracing::info!(
            email = %mask_email(email),
            otp_id = %record.id,
            event = "otp_redeemed",
            "Passcode redeemed"
        );

        let account = self
            .identity
            .create_user(email, password, full_name)
            .await
            .map_err(|err| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %err,
                    event = "account_creation_failed",
                    "Identity provider rejected account creation; passcode is spent"
                );
                err
            })?;

        tracing::info!(
            email = %mask_email(email),
            account_id = %account.id,
            event = "account_provisioned",
            "Account created with pre-confirmed email"
        );

        Ok(account)
    }
}
