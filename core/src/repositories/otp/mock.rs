//! In-memory implementation of OtpRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp::OtpRecord;
use crate::errors::DomainError;

use super::r#trait::OtpRepository;

/// In-memory passcode store.
///
/// Redemption holds the write lock across the select-and-flip, matching
/// the atomicity the SQL implementation gets from its conditional UPDATE.
#[derive(Clone, Default)]
pub struct MockOtpRepository {
    records: Arc<RwLock<Vec<OtpRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockOtpRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored records, in insertion order
    pub async fn records(&self) -> Vec<OtpRecord> {
        self.records.read().await.clone()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence {
                message: "simulated store failure".to_string(),
            });
        }

        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn redeem_newest(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence {
                message: "simulated store failure".to_string(),
            });
        }

        let mut records = self.records.write().await;

        // Newest outstanding record for the email; later insertion wins
        // a created_at tie.
        let newest = records
            .iter_mut()
            .filter(|r| r.email == email && !r.verified && !r.is_expired_at(now))
            .reduce(|best, candidate| {
                if candidate.created_at >= best.created_at {
                    candidate
                } else {
                    best
                }
            });

        match newest {
            Some(record) if record.code == code => {
                record.mark_verified();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_insert_keeps_prior_records() {
        let repo = MockOtpRepository::new();
        repo.insert(OtpRecord::new("a@x.com".to_string())).await.unwrap();
        repo.insert(OtpRecord::new("a@x.com".to_string())).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_redeem_flips_verified_once() {
        let repo = MockOtpRepository::new();
        let record = repo
            .insert(OtpRecord::new("a@x.com".to_string()))
            .await
            .unwrap();

        let redeemed = repo
            .redeem_newest("a@x.com", &record.code, Utc::now())
            .await
            .unwrap();
        assert!(redeemed.is_some());

        // Same code again: the record is spent
        let again = repo
            .redeem_newest("a@x.com", &record.code, Utc::now())
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_redeem_targets_newest_record_only() {
        let repo = MockOtpRepository::new();

        let mut older = OtpRecord::new("a@x.com".to_string());
        older.created_at = older.created_at - Duration::seconds(30);
        let older_code = older.code.clone();
        repo.insert(older).await.unwrap();

        let mut newer = OtpRecord::new("a@x.com".to_string());
        // Force distinct codes so the assertion below is meaningful
        newer.code = if older_code == "1000" { "1001".into() } else { "1000".into() };
        let newer_code = newer.code.clone();
        repo.insert(newer).await.unwrap();

        // The older code is unexpired and unconsumed but no longer canonical
        let stale = repo
            .redeem_newest("a@x.com", &older_code, Utc::now())
            .await
            .unwrap();
        assert!(stale.is_none());

        let fresh = repo
            .redeem_newest("a@x.com", &newer_code, Utc::now())
            .await
            .unwrap();
        assert!(fresh.is_some());
    }

    #[tokio::test]
    async fn test_redeem_ignores_expired_records() {
        let repo = MockOtpRepository::new();
        let record = OtpRecord::new_with_expiration("a@x.com".to_string(), 10);
        let code = record.code.clone();
        let expired_at = record.expires_at + Duration::seconds(1);
        repo.insert(record).await.unwrap();

        let redeemed = repo
            .redeem_newest("a@x.com", &code, expired_at)
            .await
            .unwrap();
        assert!(redeemed.is_none());
    }

    #[tokio::test]
    async fn test_failed_writes() {
        let repo = MockOtpRepository::new();
        repo.set_fail_writes(true);

        let result = repo.insert(OtpRecord::new("a@x.com".to_string())).await;
        assert!(matches!(result, Err(DomainError::Persistence { .. })));
    }
}
