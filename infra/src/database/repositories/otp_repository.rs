//! MySQL passcode store
//!
//! Backing table:
//!
//! ```sql
//! CREATE TABLE user_otps (
//!     id         CHAR(36)     NOT NULL PRIMARY KEY,
//!     email      VARCHAR(255) NOT NULL,
//!     code       CHAR(4)      NOT NULL,
//!     created_at DATETIME(6)  NOT NULL,
//!     expires_at DATETIME(6)  NOT NULL,
//!     verified   BOOLEAN      NOT NULL DEFAULT FALSE,
//!     INDEX idx_user_otps_email_created (email, created_at)
//! );
//! ```
//!
//! Rows are insert-only apart from the `verified` flip; retention is an
//! operational concern outside this repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, Row};
use uuid::Uuid;

use gu_core::domain::entities::otp::OtpRecord;
use gu_core::errors::DomainError;
use gu_core::repositories::OtpRepository;
use gu_shared::utils::validation::mask_email;

/// Passcode repository backed by MySQL
#[derive(Clone)]
pub struct MySqlOtpRepository {
    pool: Pool<MySql>,
}

impl MySqlOtpRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn persistence_error(context: &str, err: sqlx::Error) -> DomainError {
        DomainError::Persistence {
            message: format!("{}: {}", context, err),
        }
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO user_otps (id, email, code, created_at, expires_at, verified)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.verified)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&record.email),
                    error = %e,
                    "Failed to insert passcode record"
                );
                Self::persistence_error("failed to insert passcode record", e)
            })?;

        tracing::debug!(
            email = %mask_email(&record.email),
            otp_id = %record.id,
            "Stored passcode record"
        );

        Ok(record)
    }

    async fn redeem_newest(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        // Single conditional update: the newest outstanding row for the
        // email is the only candidate, and the flip happens in the same
        // statement. Concurrent submissions of the same code race on
        // `verified = FALSE`; exactly one wins.
        let update = r#"
            UPDATE user_otps
            SET verified = TRUE
            WHERE id = (
                SELECT id FROM (
                    SELECT id
                    FROM user_otps
                    WHERE email = ? AND verified = FALSE AND expires_at > ?
                    ORDER BY created_at DESC
                    LIMIT 1
                ) AS newest
            )
            AND code = ?
            AND verified = FALSE
        "#;

        let result = sqlx::query(update)
            .bind(email)
            .bind(now)
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to redeem passcode"
                );
                Self::persistence_error("failed to redeem passcode", e)
            })?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                email = %mask_email(email),
                "No redeemable passcode matched"
            );
            return Ok(None);
        }

        let select = r#"
            SELECT id, email, code, created_at, expires_at, verified
            FROM user_otps
            WHERE email = ? AND code = ? AND verified = TRUE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(select)
            .bind(email)
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::persistence_error("failed to load redeemed passcode", e))?;

        let id: String = row
            .try_get("id")
            .map_err(|e| Self::persistence_error("failed to read id column", e))?;
        let record = OtpRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Persistence {
                message: format!("malformed id column: {}", e),
            })?,
            email: row
                .try_get("email")
                .map_err(|e| Self::persistence_error("failed to read email column", e))?,
            code: row
                .try_get("code")
                .map_err(|e| Self::persistence_error("failed to read code column", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| Self::persistence_error("failed to read created_at column", e))?,
            expires_at: row
                .try_get("expires_at")
                .map_err(|e| Self::persistence_error("failed to read expires_at column", e))?,
            verified: row
                .try_get("verified")
                .map_err(|e| Self::persistence_error("failed to read verified column", e))?,
        };

        Ok(Some(record))
    }
}
