//! Identity provider module
//!
//! Implementations of the core `IdentityProvider` trait:
//! - **GoTrue**: production client for a GoTrue-compatible auth API
//! - **Mock**: in-memory provider for development and testing

pub mod gotrue;
pub mod mock;

use async_trait::async_trait;

use gu_core::domain::value_objects::account::Account;
use gu_core::errors::DomainError;
use gu_core::services::otp::traits::IdentityProvider;
use gu_shared::config::IdentityConfig;

pub use gotrue::{GoTrueConfig, GoTrueIdentityProvider};
pub use mock::MockIdentityProvider;

/// Identity provider chosen at startup from configuration
pub enum IdentityProviderImpl {
    GoTrue(GoTrueIdentityProvider),
    Mock(MockIdentityProvider),
}

#[async_trait]
impl IdentityProvider for IdentityProviderImpl {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Account, DomainError> {
        match self {
            IdentityProviderImpl::GoTrue(provider) => {
                provider.create_user(email, password, full_name).await
            }
            IdentityProviderImpl::Mock(provider) => {
                provider.create_user(email, password, full_name).await
            }
        }
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, DomainError> {
        match self {
            IdentityProviderImpl::GoTrue(provider) => provider.sign_in(email, password).await,
            IdentityProviderImpl::Mock(provider) => provider.sign_in(email, password).await,
        }
    }
}

/// Create an identity provider based on configuration.
///
/// Falls back to the in-memory provider when the HTTP client cannot be
/// constructed, so a missing service key never blocks local startup.
pub fn create_identity_provider(config: &IdentityConfig) -> IdentityProviderImpl {
    if config.use_mock {
        tracing::info!("Using in-memory identity provider");
        return IdentityProviderImpl::Mock(MockIdentityProvider::new());
    }

    match GoTrueIdentityProvider::new(GoTrueConfig::from(config)) {
        Ok(provider) => IdentityProviderImpl::GoTrue(provider),
        Err(e) => {
            tracing::error!("Failed to initialize identity provider client: {}", e);
            tracing::warn!("Falling back to in-memory identity provider");
            IdentityProviderImpl::Mock(MockIdentityProvider::new())
        }
    }
}
