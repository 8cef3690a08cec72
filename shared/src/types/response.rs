//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Standard success wrapper for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload, flattened into the body (absent on failure)
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Error body returned for every failed request: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Deserialize, Debug, Clone)]
    struct Payload {
        resend_after: i64,
    }

    #[test]
    fn test_success_shape() {
        let response = ApiResponse::success("OTP sent successfully", Payload { resend_after: 60 });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "OTP sent successfully",
                "resend_after": 60
            })
        );
    }

    #[test]
    fn test_error_shape() {
        let body = ErrorBody::new("Invalid or expired OTP");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "error": "Invalid or expired OTP" }));
    }
}
