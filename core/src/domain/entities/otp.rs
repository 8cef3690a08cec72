//! Passcode entity for email-based signup verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the passcode
pub const CODE_LENGTH: usize = 4;

/// Smallest issuable passcode value
pub const CODE_MIN: u32 = 1000;

/// Largest issuable passcode value
pub const CODE_MAX: u32 = 9999;

/// Default expiration time for passcodes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A single issued passcode.
///
/// Records are insert-only: issuance creates one, redemption flips
/// `verified` exactly once, and nothing here ever deletes one. Several
/// outstanding records may exist for the same email after resends; only
/// the newest of them is redeemable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Email address the passcode was issued to
    pub email: String,

    /// The 4-digit passcode
    pub code: String,

    /// Timestamp when the passcode was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the passcode expires
    pub expires_at: DateTime<Utc>,

    /// Whether the passcode has been redeemed
    pub verified: bool,
}

impl OtpRecord {
    /// Create a new record with a random 4-digit passcode and the
    /// default expiration.
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Create a new record with a custom expiration time
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            verified: false,
        }
    }

    /// Generate a passcode uniformly distributed over 1000..=9999
    fn generate_code() -> String {
        let code: u32 = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Check whether the passcode has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check whether the passcode has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check whether the record can still be redeemed at `now` with the
    /// submitted code: unconsumed, unexpired, and an exact code match.
    pub fn is_redeemable_with(&self, code: &str, now: DateTime<Utc>) -> bool {
        !self.verified && !self.is_expired_at(now) && self.code == code
    }

    /// Mark the record as redeemed. Irreversible.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }
}
