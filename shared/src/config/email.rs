//! Transactional email delivery configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound email provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider API base URL
    pub api_url: String,

    /// Provider API key
    pub api_key: String,

    /// Sender address shown to recipients
    pub from_address: String,

    /// Subject line for passcode messages
    #[serde(default = "default_subject")]
    pub passcode_subject: String,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Use the console mailer instead of the HTTP provider
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.resend.com"),
            api_key: String::new(),
            from_address: String::from("Grade Up <no-reply@gradeup.study>"),
            passcode_subject: default_subject(),
            request_timeout_secs: default_request_timeout(),
            use_mock: true,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let api_key = std::env::var("RESEND_API_KEY").unwrap_or_default();
        Self {
            api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Grade Up <no-reply@gradeup.study>".to_string()),
            // Fall back to the console mailer when no key is configured
            use_mock: api_key.is_empty(),
            api_key,
            ..Default::default()
        }
    }
}

fn default_subject() -> String {
    String::from("Your Grade Up verification code")
}

fn default_request_timeout() -> u64 {
    30
}
