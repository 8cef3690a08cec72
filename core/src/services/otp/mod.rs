//! Passcode issuance and redemption services

pub mod config;
pub mod issuer;
pub mod traits;
pub mod types;
pub mod verifier;

pub use config::OtpServiceConfig;
pub use issuer::OtpIssuer;
pub use traits::{IdentityProvider, MailSender};
pub use types::IssueOutcome;
pub use verifier::OtpVerifier;

#[cfg(test)]
mod tests;
