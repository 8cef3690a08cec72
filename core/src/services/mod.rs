//! Business services

pub mod otp;
pub mod signup_flow;

pub use otp::{IdentityProvider, MailSender, OtpIssuer, OtpServiceConfig, OtpVerifier};
pub use signup_flow::{FlowState, SignupFlow, TransitionError};
