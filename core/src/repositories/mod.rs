//! Repository interfaces and in-memory implementations for testing

pub mod otp;

pub use otp::{MockOtpRepository, OtpRepository};
