//! Domain error to HTTP response mapping

use actix_web::HttpResponse;
use validator::ValidationErrors;

use gu_core::errors::DomainError;
use gu_shared::types::response::ErrorBody;

/// Convert a domain error into the `{"error": message}` response body
/// with the status the contract prescribes.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.clone()))
        }
        DomainError::InvalidOrExpiredCode => {
            HttpResponse::BadRequest().json(ErrorBody::new("Invalid or expired OTP"))
        }
        // Provider rejections surface verbatim so the client can show them
        DomainError::AccountCreation { message } => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.clone()))
        }
        DomainError::AuthenticationFailed { message } => {
            HttpResponse::Unauthorized().json(ErrorBody::new(message.clone()))
        }
        DomainError::Persistence { .. } => {
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to store OTP"))
        }
        DomainError::Delivery { .. } | DomainError::Internal { .. } => {
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

/// Convert DTO validation failures into a 400 with a terse field list
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(ErrorBody::new(format!(
        "Invalid request data: {}",
        fields.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_invalid_code_maps_to_400() {
        let response = domain_error_response(&DomainError::InvalidOrExpiredCode);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_persistence_maps_to_500() {
        let response = domain_error_response(&DomainError::Persistence {
            message: "connection refused".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_authentication_maps_to_401() {
        let response = domain_error_response(&DomainError::AuthenticationFailed {
            message: "Invalid login credentials".to_string(),
        });
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
