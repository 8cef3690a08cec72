//! Result types for the passcode services

use chrono::{DateTime, Utc};

use crate::domain::entities::otp::OtpRecord;

/// Outcome of a successful issuance
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// The persisted record
    pub record: OtpRecord,

    /// Provider delivery id; `None` when the send failed (non-fatal)
    pub delivery_id: Option<String>,

    /// Earliest instant the client should allow a resend
    pub next_resend_at: DateTime<Utc>,

    /// The raw passcode, present only when code echo is configured
    pub exposed_code: Option<String>,
}
