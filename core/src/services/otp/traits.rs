//! Traits for the external collaborators of the passcode services

use async_trait::async_trait;

use crate::domain::value_objects::account::Account;
use crate::errors::DomainError;

/// Trait for the transactional mail sender
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver a passcode message to a recipient.
    ///
    /// # Returns
    /// * `Ok(String)` - The provider's delivery id
    /// * `Err(DomainError::Delivery)` - The provider rejected the message
    async fn send_passcode(&self, email: &str, code: &str) -> Result<String, DomainError>;
}

/// Trait for the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account with a pre-confirmed email address.
    ///
    /// The email was proved by passcode redemption, so the provider is
    /// told to skip its own confirmation mail. `full_name` lands in the
    /// account's profile metadata.
    ///
    /// # Returns
    /// * `Ok(Account)` - The provisioned account
    /// * `Err(DomainError::AccountCreation)` - The provider rejected the
    ///   request (e.g. duplicate email)
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Account, DomainError>;

    /// Exchange email + password for the provider's session payload.
    ///
    /// # Returns
    /// * `Ok(serde_json::Value)` - The provider's session payload, untouched
    /// * `Err(DomainError::AuthenticationFailed)` - Rejected credentials
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<serde_json::Value, DomainError>;
}
