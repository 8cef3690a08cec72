//! Passcode issuance policy

use serde::{Deserialize, Serialize};

/// Policy knobs for passcode issuance and redemption
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes before an issued passcode expires
    #[serde(default = "default_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Minimum seconds between resend requests (client cooldown)
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,

    /// Echo the generated passcode in issuance responses.
    ///
    /// Development convenience only; `AppConfig::expose_code_enabled`
    /// refuses to honor it in production.
    #[serde(default)]
    pub expose_code: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_expiration_minutes(),
            resend_cooldown_seconds: default_resend_cooldown(),
            expose_code: false,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_expiration_minutes: std::env::var("OTP_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_expiration_minutes),
            resend_cooldown_seconds: std::env::var("OTP_RESEND_COOLDOWN_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_resend_cooldown),
            expose_code: std::env::var("OTP_EXPOSE_CODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

fn default_expiration_minutes() -> i64 {
    10
}

fn default_resend_cooldown() -> i64 {
    60
}
