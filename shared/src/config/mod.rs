//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `email` - Transactional email delivery configuration
//! - `environment` - Environment detection and logging configuration
//! - `identity` - External identity provider configuration
//! - `otp` - Passcode issuance policy
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod email;
pub mod environment;
pub mod identity;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LoggingConfig};
pub use identity::IdentityConfig;
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// Identity provider configuration
    pub identity: IdentityConfig,

    /// Passcode issuance policy
    pub otp: OtpConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            email: EmailConfig::default(),
            identity: IdentityConfig::default(),
            otp: OtpConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for the development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/gradeup_dev"),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for the production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            database: DatabaseConfig::from_env().with_max_connections(50),
            email: EmailConfig::from_env(),
            identity: IdentityConfig::from_env(),
            otp: OtpConfig::from_env(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Production => Self::production(),
            _ => Self {
                environment: env,
                database: DatabaseConfig::from_env(),
                email: EmailConfig::from_env(),
                identity: IdentityConfig::from_env(),
                otp: OtpConfig::from_env(),
                cors: CorsConfig::development(),
                logging: LoggingConfig::for_environment(env),
                ..Default::default()
            },
        };
        config.server = ServerConfig::from_env();
        config
    }

    /// Whether issuance responses may echo the generated passcode.
    ///
    /// The flag never arms in production, regardless of configuration.
    pub fn expose_code_enabled(&self) -> bool {
        self.otp.expose_code && !self.environment.is_production()
    }
}
