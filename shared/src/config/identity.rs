//! External identity provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the identity provider (GoTrue-compatible API)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Provider base URL, e.g. `https://auth.gradeup.study`
    pub base_url: String,

    /// Service-role key used for admin operations
    pub service_role_key: String,

    /// Anonymous key used for the password sign-in endpoint
    pub anon_key: String,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Use the in-memory provider instead of the HTTP API
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:9999"),
            service_role_key: String::new(),
            anon_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            use_mock: true,
        }
    }
}

impl IdentityConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let service_role_key = std::env::var("IDENTITY_SERVICE_ROLE_KEY").unwrap_or_default();
        Self {
            base_url: std::env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9999".to_string()),
            anon_key: std::env::var("IDENTITY_ANON_KEY").unwrap_or_default(),
            use_mock: service_role_key.is_empty(),
            service_role_key,
            ..Default::default()
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}
