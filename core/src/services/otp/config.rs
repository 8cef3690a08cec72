//! Configuration for the passcode services

use crate::domain::entities::otp::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the passcode issuer
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before an issued passcode expires
    pub code_expiration_minutes: i64,

    /// Minimum seconds between resend requests, reported to clients
    pub resend_cooldown_seconds: i64,

    /// Expose the generated passcode in the issue outcome.
    ///
    /// Only ever enabled outside production; the configuration layer
    /// enforces that.
    pub expose_code: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
            expose_code: false,
        }
    }
}
