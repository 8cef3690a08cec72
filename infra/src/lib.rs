//! # Infrastructure Layer
//!
//! Concrete implementations of the core's external collaborators:
//! - **Database**: MySQL passcode store using SQLx
//! - **Email**: Resend HTTP API mailer, plus a console mailer for development
//! - **Identity**: GoTrue-compatible identity provider client, plus an
//!   in-memory provider for development

pub mod database;
pub mod email;
pub mod identity;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client construction or request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
