//! Auth endpoint DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use gu_shared::utils::validation::is_valid_email;

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Recipient address for the passcode email
    #[validate(custom = "validate_email")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Address the passcode was issued to
    #[validate(custom = "validate_email")]
    pub email: String,

    /// 4-digit passcode from the email
    #[validate(length(equal = 4))]
    pub otp: String,

    /// Password to set on the new account
    #[validate(length(min = 1))]
    pub password: String,

    /// Optional display name stored on the account profile
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_email")]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload of a successful `send-otp` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpData {
    /// Seconds the client should wait before offering a resend
    pub resend_after: i64,

    /// The raw passcode; present only in development mode with code
    /// echo enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Payload of a successful `verify-otp` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpData {
    /// The identity provider's account object, passed through verbatim
    pub user: serde_json::Value,
}

/// Payload of a successful `login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    /// The identity provider's session payload, passed through verbatim
    pub session: serde_json::Value,
}
