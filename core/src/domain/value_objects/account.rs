//! Account value object returned by the identity provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provisioned account.
///
/// The identity provider owns the account schema; this core only pins
/// down the identifier and email and carries the rest of the provider's
/// payload through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Provider-assigned account identifier
    pub id: String,

    /// Email address on the account
    pub email: String,

    /// Raw provider payload, surfaced verbatim to API clients
    pub payload: Value,
}

impl Account {
    /// Build an account from a provider payload, extracting the fields
    /// this core relies on. Returns `None` when the payload lacks an id.
    pub fn from_payload(payload: Value) -> Option<Self> {
        let id = payload.get("id")?.as_str()?.to_string();
        let email = payload
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(Self { id, email, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload() {
        let payload = json!({
            "id": "8f14e45f-ceea-4e5b-9d6f-0c1a9c2b3d4e",
            "email": "student@gradeup.study",
            "email_confirmed_at": "2025-01-01T00:00:00Z",
            "user_metadata": { "full_name": "Sam Student" }
        });

        let account = Account::from_payload(payload.clone()).unwrap();
        assert_eq!(account.id, "8f14e45f-ceea-4e5b-9d6f-0c1a9c2b3d4e");
        assert_eq!(account.email, "student@gradeup.study");
        assert_eq!(account.payload, payload);
    }

    #[test]
    fn test_from_payload_without_id() {
        assert!(Account::from_payload(json!({ "email": "a@x.com" })).is_none());
    }
}
