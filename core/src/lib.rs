//! # Grade Up Core
//!
//! Core business logic and domain layer for the Grade Up backend.
//! This crate contains the passcode entity, repository interfaces, the
//! issuer/verifier services, the signup flow state machine, and the
//! domain error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::otp::OtpRecord;
pub use domain::value_objects::account::Account;
pub use errors::{DomainError, DomainResult};
pub use repositories::OtpRepository;
