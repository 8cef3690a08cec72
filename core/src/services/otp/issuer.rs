//! Passcode issuance service

use chrono::{Duration, Utc};
use std::sync::Arc;

use gu_shared::utils::validation::mask_email;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OtpRepository;

use super::config::OtpServiceConfig;
use super::traits::MailSender;
use super::types::IssueOutcome;

/// Issues passcodes: generate, persist, deliver.
pub struct OtpIssuer<R: OtpRepository, M: MailSender> {
    repository: Arc<R>,
    mail_sender: Arc<M>,
    config: OtpServiceConfig,
}

impl<R: OtpRepository, M: MailSender> OtpIssuer<R, M> {
    /// Create a new issuer
    pub fn new(repository: Arc<R>, mail_sender: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            repository,
            mail_sender,
            config,
        }
    }

    /// Issue a fresh passcode for an email address.
    ///
    /// Every call inserts a new record; earlier outstanding codes stay
    /// in the store and are superseded at redemption by the
    /// newest-record rule. A persistence failure aborts the call. A
    /// delivery failure does not: the record is already redeemable, so
    /// the failure is logged and the issuance still succeeds.
    pub async fn issue(&self, email: &str) -> DomainResult<IssueOutcome> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::Validation {
                message: "email is required".to_string(),
            });
        }

        let record = OtpRecord::new_with_expiration(
            email.to_string(),
            self.config.code_expiration_minutes,
        );

        let record = self.repository.insert(record).await.map_err(|err| {
            tracing::error!(
                email = %mask_email(email),
                error = %err,
                event = "otp_store_failed",
                "Failed to persist passcode"
            );
            err
        })?;

        tracing::info!(
            email = %mask_email(email),
            otp_id = %record.id,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued new passcode"
        );

        let delivery_id = match self.mail_sender.send_passcode(email, &record.code).await {
            Ok(id) => {
                tracing::info!(
                    email = %mask_email(email),
                    delivery_id = %id,
                    event = "otp_delivered",
                    "Passcode email accepted by provider"
                );
                Some(id)
            }
            Err(err) => {
                // The record is persisted and redeemable; surface
                // success anyway and leave this log line as the signal.
                tracing::error!(
                    email = %mask_email(email),
                    error = %err,
                    event = "otp_delivery_failed",
                    "Passcode email delivery failed"
                );
                None
            }
        };

        let next_resend_at =
            Utc::now() + Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(IssueOutcome {
            exposed_code: self.config.expose_code.then(|| record.code.clone()),
            record,
            delivery_id,
            next_resend_at,
        })
    }
}
