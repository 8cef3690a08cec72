//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use gu_core::repositories::OtpRepository;
use gu_core::services::otp::traits::{IdentityProvider, MailSender};
use gu_shared::types::response::ApiResponse;
use gu_shared::utils::validation::mask_email;

use crate::dto::auth::{LoginData, LoginRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Sign in with email + password.
///
/// Pure passthrough to the identity provider; the passcode flow plays
/// no part here. The provider's session payload is surfaced untouched.
///
/// # Responses
///
/// * 200 - `{"success": true, "message": "...", "session": {...}}`
/// * 401 - `{"error": "..."}` rejected credentials, verbatim
pub async fn login<R, M, I>(
    state: web::Data<AppState<R, M, I>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    M: MailSender + 'static,
    I: IdentityProvider + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .identity
        .sign_in(&request.email, &request.password)
        .await
    {
        Ok(session) => {
            tracing::info!(email = %mask_email(&request.email), "User signed in");
            HttpResponse::Ok().json(ApiResponse::success(
                "Signed in successfully",
                LoginData { session },
            ))
        }
        Err(error) => domain_error_response(&error),
    }
}
