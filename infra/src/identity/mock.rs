//! In-memory identity provider
//!
//! Holds accounts in a map and hands out canned sessions. Used in
//! development and by the API integration tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use gu_core::domain::value_objects::account::Account;
use gu_core::errors::DomainError;
use gu_core::services::otp::traits::IdentityProvider;

#[derive(Clone)]
struct StoredAccount {
    id: String,
    password: String,
    full_name: Option<String>,
}

/// In-memory identity provider for development and testing
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
}

impl MockIdentityProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of provisioned accounts
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Whether an account exists for the email
    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.contains_key(email) {
            return Err(DomainError::AccountCreation {
                message: "A user with this email address has already been registered"
                    .to_string(),
            });
        }

        let stored = StoredAccount {
            id: Uuid::new_v4().to_string(),
            password: password.to_string(),
            full_name: full_name.map(str::to_string),
        };
        let payload = json!({
            "id": stored.id,
            "email": email,
            "email_confirmed_at": chrono::Utc::now().to_rfc3339(),
            "user_metadata": { "full_name": stored.full_name },
        });
        let account = Account {
            id: stored.id.clone(),
            email: email.to_string(),
            payload,
        };
        accounts.insert(email.to_string(), stored);

        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Value, DomainError> {
        let accounts = self.accounts.lock().unwrap();

        match accounts.get(email) {
            Some(stored) if stored.password == password => Ok(json!({
                "access_token": format!("mock-token-{}", stored.id),
                "token_type": "bearer",
                "user": { "id": stored.id, "email": email },
            })),
            _ => Err(DomainError::AuthenticationFailed {
                message: "Invalid login credentials".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_sign_in() {
        let provider = MockIdentityProvider::new();

        let account = provider
            .create_user("a@x.com", "hunter2!", Some("Sam"))
            .await
            .unwrap();
        assert_eq!(account.email, "a@x.com");
        assert!(provider.has_account("a@x.com"));

        let session = provider.sign_in("a@x.com", "hunter2!").await.unwrap();
        assert_eq!(session["token_type"], json!("bearer"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = MockIdentityProvider::new();
        provider.create_user("a@x.com", "pw1", None).await.unwrap();

        let result = provider.create_user("a@x.com", "pw2", None).await;
        match result {
            Err(DomainError::AccountCreation { message }) => {
                assert!(message.contains("already been registered"));
            }
            other => panic!("expected AccountCreation error, got {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let provider = MockIdentityProvider::new();
        provider.create_user("a@x.com", "right", None).await.unwrap();

        let result = provider.sign_in("a@x.com", "wrong").await;
        assert!(matches!(
            result,
            Err(DomainError::AuthenticationFailed { .. })
        ));
    }
}
