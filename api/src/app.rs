//! Route wiring

use actix_web::web;

use gu_core::repositories::OtpRepository;
use gu_core::services::otp::traits::{IdentityProvider, MailSender};

use crate::routes;

/// Register all API routes.
///
/// Generic over the wired collaborators so tests can drive the same
/// routing table with in-memory implementations.
pub fn configure_api<R, M, I>(cfg: &mut web::ServiceConfig)
where
    R: OtpRepository + 'static,
    M: MailSender + 'static,
    I: IdentityProvider + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route(
                "/send-otp",
                web::post().to(routes::auth::send_otp::send_otp::<R, M, I>),
            )
            .route(
                "/verify-otp",
                web::post().to(routes::auth::verify_otp::verify_otp::<R, M, I>),
            )
            .route(
                "/login",
                web::post().to(routes::auth::login::login::<R, M, I>),
            ),
    )
    .route("/health", web::get().to(routes::health_check));
}
