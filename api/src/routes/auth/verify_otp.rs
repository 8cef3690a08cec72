//! Handler for POST /api/v1/auth/verify-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use gu_core::repositories::OtpRepository;
use gu_core::services::otp::traits::{IdentityProvider, MailSender};
use gu_shared::types::response::ApiResponse;
use gu_shared::utils::validation::mask_email;

use crate::dto::auth::{VerifyOtpData, VerifyOtpRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Redeem a passcode and create the verified account.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "student@example.com",
///     "otp": "4829",
///     "password": "secret",
///     "fullName": "Sam Student"
/// }
/// ```
///
/// # Responses
///
/// * 200 - `{"success": true, "message": "...", "user": {...}}`
/// * 400 - `{"error": "Invalid or expired OTP"}` no redeemable match
/// * 400 - `{"error": "..."}` identity provider rejection, verbatim
/// * 500 - `{"error": "..."}` store failure
pub async fn verify_otp<R, M, I>(
    state: web::Data<AppState<R, M, I>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    M: MailSender + 'static,
    I: IdentityProvider + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(
            email = %mask_email(&request.email),
            "Rejected verify-otp request with invalid payload"
        );
        return validation_error_response(&errors);
    }

    let result = state
        .verifier
        .verify(
            &request.email,
            &request.otp,
            &request.password,
            request.full_name.as_deref(),
        )
        .await;

    match result {
        Ok(account) => HttpResponse::Ok().json(ApiResponse::success(
            "Account created successfully",
            VerifyOtpData {
                user: account.payload,
            },
        )),
        Err(error) => domain_error_response(&error),
    }
}
