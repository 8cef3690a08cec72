//! Domain entities

pub mod otp;

pub use otp::OtpRecord;
