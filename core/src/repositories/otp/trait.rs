//! Passcode repository trait defining the interface for OTP persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for `OtpRecord` persistence operations.
///
/// The store is insert-only apart from the single `verified` flip
/// performed by `redeem_newest`. Implementations must make that flip
/// atomic with respect to concurrent redemption attempts: two
/// simultaneous submissions of the same valid code must not both
/// succeed.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a freshly issued record.
    ///
    /// Always inserts a new row; prior records for the same email are
    /// never touched.
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The persisted record
    /// * `Err(DomainError::Persistence)` - Store unreachable or write rejected
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Atomically redeem the newest outstanding record for an email.
    ///
    /// Selects the most recently created record for `email` with
    /// `verified = false` and `expires_at > now`, and flips `verified`
    /// iff the submitted `code` matches that record exactly. The select
    /// and flip execute as one conditional update, not read-then-write.
    ///
    /// An older outstanding code never redeems, even while unexpired:
    /// only the newest record is compared.
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - The record that was redeemed
    /// * `Ok(None)` - Nothing redeemable matched
    /// * `Err(DomainError::Persistence)` - Store unreachable
    async fn redeem_newest(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError>;
}
