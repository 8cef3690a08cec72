//! Verifier service tests

use std::sync::Arc;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainError;
use crate::repositories::{MockOtpRepository, OtpRepository};
use crate::services::otp::verifier::OtpVerifier;

use super::mocks::FakeIdentityProvider;

fn verifier(
    repo: Arc<MockOtpRepository>,
    identity: Arc<FakeIdentityProvider>,
) -> OtpVerifier<MockOtpRepository, FakeIdentityProvider> {
    OtpVerifier::new(repo, identity)
}

async fn issue_record(repo: &MockOtpRepository, email: &str) -> OtpRecord {
    repo.insert(OtpRecord::new(email.to_string())).await.unwrap()
}

#[tokio::test]
async fn test_verify_creates_preconfirmed_account() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());
    let record = issue_record(&repo, "student@gradeup.study").await;
    let service = verifier(repo.clone(), identity.clone());

    let account = service
        .verify("student@gradeup.study", &record.code, "hunter2!", Some("Sam Student"))
        .await
        .unwrap();

    assert_eq!(account.email, "student@gradeup.study");
    assert_eq!(
        account.payload["user_metadata"]["full_name"],
        serde_json::json!("Sam Student")
    );

    // The record is spent
    let records = repo.records().await;
    assert!(records[0].verified);
}

#[tokio::test]
async fn test_verify_rejects_wrong_code_without_mutation() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());
    let record = issue_record(&repo, "student@gradeup.study").await;
    let wrong = if record.code == "1000" { "1001" } else { "1000" };
    let service = verifier(repo.clone(), identity.clone());

    let result = service
        .verify("student@gradeup.study", wrong, "hunter2!", None)
        .await;

    assert!(matches!(result, Err(DomainError::InvalidOrExpiredCode)));
    assert!(!repo.records().await[0].verified);
    assert!(identity.accounts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_rejects_expired_code() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());

    let record = OtpRecord::new_with_expiration("student@gradeup.study".to_string(), -1);
    let code = record.code.clone();
    repo.insert(record).await.unwrap();

    let service = verifier(repo, identity);
    let result = service
        .verify("student@gradeup.study", &code, "hunter2!", None)
        .await;

    assert!(matches!(result, Err(DomainError::InvalidOrExpiredCode)));
}

#[tokio::test]
async fn test_verify_same_code_twice_fails_second_time() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());
    let record = issue_record(&repo, "student@gradeup.study").await;
    let service = verifier(repo, identity);

    service
        .verify("student@gradeup.study", &record.code, "hunter2!", None)
        .await
        .unwrap();

    let second = service
        .verify("student@gradeup.study", &record.code, "hunter2!", None)
        .await;
    assert!(matches!(second, Err(DomainError::InvalidOrExpiredCode)));
}

#[tokio::test]
async fn test_older_code_fails_after_resend() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());

    let mut older = OtpRecord::new("student@gradeup.study".to_string());
    older.created_at = older.created_at - chrono::Duration::seconds(30);
    older.code = "1111".to_string();
    repo.insert(older).await.unwrap();

    let mut newer = OtpRecord::new("student@gradeup.study".to_string());
    newer.code = "2222".to_string();
    repo.insert(newer).await.unwrap();

    let service = verifier(repo.clone(), identity);

    // The older code is unexpired and unconsumed, yet superseded
    let stale = service
        .verify("student@gradeup.study", "1111", "hunter2!", None)
        .await;
    assert!(matches!(stale, Err(DomainError::InvalidOrExpiredCode)));

    let fresh = service
        .verify("student@gradeup.study", "2222", "hunter2!", None)
        .await;
    assert!(fresh.is_ok());
}

#[tokio::test]
async fn test_account_creation_failure_leaves_code_spent() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::rejecting());
    let record = issue_record(&repo, "student@gradeup.study").await;
    let service = verifier(repo.clone(), identity);

    let result = service
        .verify("student@gradeup.study", &record.code, "hunter2!", None)
        .await;

    match result {
        Err(DomainError::AccountCreation { message }) => {
            assert!(message.contains("already been registered"));
        }
        other => panic!("expected AccountCreation error, got {:?}", other.map(|a| a.id)),
    }

    // Ordering guarantee: the flip precedes provisioning, so the code
    // cannot be replayed against a second creation attempt.
    assert!(repo.records().await[0].verified);
}

#[tokio::test]
async fn test_verify_input_validation() {
    let repo = Arc::new(MockOtpRepository::new());
    let identity = Arc::new(FakeIdentityProvider::new());
    let service = verifier(repo, identity);

    for (email, code, password) in [
        ("", "1234", "pw"),
        ("a@x.com", "123", "pw"),
        ("a@x.com", "12345", "pw"),
        ("a@x.com", "12a4", "pw"),
        ("a@x.com", "1234", ""),
    ] {
        let result = service.verify(email, code, password, None).await;
        assert!(
            matches!(result, Err(DomainError::Validation { .. })),
            "expected validation error for {:?}",
            (email, code, password)
        );
    }
}
