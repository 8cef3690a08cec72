//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// Every failure a service can surface maps to one of these variants.
/// The API layer owns the HTTP status mapping; infrastructure crates
/// convert their own errors into these at the trait boundary.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Caller supplied missing or malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The passcode store was unreachable or rejected a write
    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    /// The mail provider failed to accept the message.
    ///
    /// Never surfaced to callers: the issuer logs it and still reports
    /// success, since the persisted passcode remains redeemable.
    #[error("Delivery failure: {message}")]
    Delivery { message: String },

    /// No redeemable passcode matched the submitted email + code
    #[error("Invalid or expired OTP")]
    InvalidOrExpiredCode,

    /// The identity provider rejected account creation
    #[error("{message}")]
    AccountCreation { message: String },

    /// The identity provider rejected a sign-in attempt
    #[error("{message}")]
    AuthenticationFailed { message: String },

    /// Unexpected failure not covered by the taxonomy above
    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_or_expired_message() {
        assert_eq!(
            DomainError::InvalidOrExpiredCode.to_string(),
            "Invalid or expired OTP"
        );
    }

    #[test]
    fn test_provider_messages_surface_verbatim() {
        let err = DomainError::AccountCreation {
            message: "A user with this email address has already been registered".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "A user with this email address has already been registered"
        );
    }
}
