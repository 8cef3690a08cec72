//! Shared utilities and common types for the Grade Up server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common response structures
//! - Utility functions (email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment, IdentityConfig,
    LoggingConfig, OtpConfig, ServerConfig,
};
pub use types::response::{ApiResponse, ErrorBody};
pub use utils::validation;
