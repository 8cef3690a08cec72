//! Handler for POST /api/v1/auth/send-otp

use actix_web::{web, HttpResponse};
use validator::Validate;

use gu_core::repositories::OtpRepository;
use gu_core::services::otp::traits::{IdentityProvider, MailSender};
use gu_shared::types::response::ApiResponse;
use gu_shared::utils::validation::mask_email;

use crate::dto::auth::{SendOtpData, SendOtpRequest};
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Issue a passcode and email it to the requested address.
///
/// # Request Body
///
/// ```json
/// { "email": "student@example.com" }
/// ```
///
/// # Responses
///
/// * 200 - `{"success": true, "message": "...", "resend_after": 60}`
///   (development mode with code echo adds an `"otp"` field)
/// * 400 - `{"error": "..."}` missing or malformed email
/// * 500 - `{"error": "Failed to store OTP"}` store write rejected
pub async fn send_otp<R, M, I>(
    state: web::Data<AppState<R, M, I>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    M: MailSender + 'static,
    I: IdentityProvider + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(
            email = %mask_email(&request.email),
            "Rejected send-otp request with invalid payload"
        );
        return validation_error_response(&errors);
    }

    match state.issuer.issue(&request.email).await {
        Ok(outcome) => {
            // Round up so the client never resends a hair early
            let remaining_ms = (outcome.next_resend_at - chrono::Utc::now())
                .num_milliseconds()
                .max(0);
            let resend_after = (remaining_ms + 999) / 1000;

            HttpResponse::Ok().json(ApiResponse::success(
                "OTP sent successfully",
                SendOtpData {
                    resend_after,
                    otp: outcome.exposed_code,
                },
            ))
        }
        Err(error) => {
            tracing::error!(
                email = %mask_email(&request.email),
                error = %error,
                "Failed to issue passcode"
            );
            domain_error_response(&error)
        }
    }
}
