//! Auth routes: passcode issuance, redemption, and login

pub mod login;
pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use gu_core::repositories::OtpRepository;
use gu_core::services::otp::traits::{IdentityProvider, MailSender};
use gu_core::services::otp::{OtpIssuer, OtpVerifier};

/// Application state holding the wired services
pub struct AppState<R, M, I>
where
    R: OtpRepository,
    M: MailSender,
    I: IdentityProvider,
{
    pub issuer: Arc<OtpIssuer<R, M>>,
    pub verifier: Arc<OtpVerifier<R, I>>,
    pub identity: Arc<I>,
}
