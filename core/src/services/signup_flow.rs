//! Signup flow state machine
//!
//! Client-side sequencing for the signup path: request a passcode,
//! collect it, verify it, then hand off to login. States and events are
//! explicit; an event that does not apply to the current state is
//! rejected with a `TransitionError` instead of being silently ignored.

use thiserror::Error;

use crate::domain::entities::otp::CODE_LENGTH;

/// Seconds a client must wait between resend requests
pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Credentials held while the flow is in progress.
///
/// Dropped as soon as the flow succeeds or is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSignup {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Flow states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing in progress
    Idle,
    /// Issuance request in flight
    CodeRequested,
    /// Waiting for the user to type the emailed passcode
    CodeEntry { cooldown_secs: u32 },
    /// Verification request in flight
    Verifying { cooldown_secs: u32 },
    /// Verification failed; the user may retry or abandon
    Failed { cooldown_secs: u32 },
    /// Account created; credentials have been discarded
    Succeeded,
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "Idle",
            FlowState::CodeRequested => "CodeRequested",
            FlowState::CodeEntry { .. } => "CodeEntry",
            FlowState::Verifying { .. } => "Verifying",
            FlowState::Failed { .. } => "Failed",
            FlowState::Succeeded => "Succeeded",
        }
    }
}

/// Rejected transitions
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransitionError {
    #[error("event {event} does not apply in state {state}")]
    InvalidEvent {
        state: &'static str,
        event: &'static str,
    },

    #[error("resend available in {remaining} seconds")]
    CooldownActive { remaining: u32 },

    #[error("code must be exactly {CODE_LENGTH} digits")]
    MalformedCode,

    #[error("email and password are required")]
    MissingCredentials,
}

/// The signup flow.
///
/// Drives the issue/verify calls from the outside: the flow itself owns
/// no I/O, it only validates event ordering and holds the pending
/// credentials between steps.
#[derive(Debug, Default)]
pub struct SignupFlow {
    state: FlowState,
    pending: Option<PendingSignup>,
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Idle
    }
}

impl SignupFlow {
    /// Create a flow in `Idle`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Credentials held by the flow, if any
    pub fn pending(&self) -> Option<&PendingSignup> {
        self.pending.as_ref()
    }

    /// Whether the flow has reached `Succeeded`
    pub fn is_complete(&self) -> bool {
        matches!(self.state, FlowState::Succeeded)
    }

    /// Seconds left before a resend is allowed; zero outside `CodeEntry`
    pub fn cooldown_remaining(&self) -> u32 {
        match self.state {
            FlowState::CodeEntry { cooldown_secs }
            | FlowState::Verifying { cooldown_secs }
            | FlowState::Failed { cooldown_secs } => cooldown_secs,
            _ => 0,
        }
    }

    /// Whether a resend may be triggered right now
    pub fn can_resend(&self) -> bool {
        matches!(self.state, FlowState::CodeEntry { cooldown_secs: 0 })
    }

    /// `Idle -> CodeRequested`: the user submitted the signup form.
    /// The caller then invokes the issuer.
    pub fn submit_signup(
        &mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: Option<String>,
    ) -> Result<(), TransitionError> {
        if !matches!(self.state, FlowState::Idle) {
            return Err(self.invalid("submit_signup"));
        }

        let email = email.into();
        let password = password.into();
        if email.trim().is_empty() || password.is_empty() {
            return Err(TransitionError::MissingCredentials);
        }

        self.pending = Some(PendingSignup {
            email,
            password,
            full_name,
        });
        self.state = FlowState::CodeRequested;
        Ok(())
    }

    /// `CodeRequested -> CodeEntry`: issuance succeeded. Resets the
    /// resend cooldown to its full value.
    pub fn code_sent(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, FlowState::CodeRequested) {
            return Err(self.invalid("code_sent"));
        }

        self.state = FlowState::CodeEntry {
            cooldown_secs: RESEND_COOLDOWN_SECS,
        };
        Ok(())
    }

    /// `CodeRequested -> Idle`: issuance failed. Credentials dropped;
    /// the caller surfaces the error.
    pub fn send_failed(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, FlowState::CodeRequested) {
            return Err(self.invalid("send_failed"));
        }

        self.reset();
        Ok(())
    }

    /// One-second timer tick. Only `CodeEntry` counts down; elsewhere
    /// this is a no-op.
    pub fn tick(&mut self) {
        if let FlowState::CodeEntry { cooldown_secs } = &mut self.state {
            *cooldown_secs = cooldown_secs.saturating_sub(1);
        }
    }

    /// `CodeEntry -> CodeRequested`: the user asked for a new code.
    /// Only allowed once the cooldown has elapsed.
    pub fn resend(&mut self) -> Result<(), TransitionError> {
        match self.state {
            FlowState::CodeEntry { cooldown_secs: 0 } => {
                self.state = FlowState::CodeRequested;
                Ok(())
            }
            FlowState::CodeEntry { cooldown_secs } => {
                Err(TransitionError::CooldownActive {
                    remaining: cooldown_secs,
                })
            }
            _ => Err(self.invalid("resend")),
        }
    }

    /// `CodeEntry -> Verifying`: the user submitted a passcode. The
    /// code must be exactly four digits before the verifier is called.
    pub fn submit_code(&mut self, code: &str) -> Result<(), TransitionError> {
        let FlowState::CodeEntry { cooldown_secs } = self.state else {
            return Err(self.invalid("submit_code"));
        };

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(TransitionError::MalformedCode);
        }

        self.state = FlowState::Verifying { cooldown_secs };
        Ok(())
    }

    /// `Verifying -> Succeeded`: the account exists. The held
    /// email/password are discarded; the caller switches to login mode.
    pub fn verification_succeeded(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, FlowState::Verifying { .. }) {
            return Err(self.invalid("verification_succeeded"));
        }

        self.pending = None;
        self.state = FlowState::Succeeded;
        Ok(())
    }

    /// `Verifying -> Failed`: verification was rejected. The cooldown
    /// carries over so a retry does not grant an early resend.
    pub fn verification_failed(&mut self) -> Result<(), TransitionError> {
        let FlowState::Verifying { cooldown_secs } = self.state else {
            return Err(self.invalid("verification_failed"));
        };

        self.state = FlowState::Failed { cooldown_secs };
        Ok(())
    }

    /// `Failed -> CodeEntry`: the user wants to try another code.
    pub fn retry(&mut self) -> Result<(), TransitionError> {
        let FlowState::Failed { cooldown_secs } = self.state else {
            return Err(self.invalid("retry"));
        };

        self.state = FlowState::CodeEntry { cooldown_secs };
        Ok(())
    }

    /// Return to `Idle` from any non-terminal state, dropping held
    /// credentials.
    pub fn abandon(&mut self) -> Result<(), TransitionError> {
        if matches!(self.state, FlowState::Succeeded) {
            return Err(self.invalid("abandon"));
        }

        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.pending = None;
        self.state = FlowState::Idle;
    }

    fn invalid(&self, event: &'static str) -> TransitionError {
        TransitionError::InvalidEvent {
            state: self.state.name(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_flow() -> SignupFlow {
        let mut flow = SignupFlow::new();
        flow.submit_signup("student@gradeup.study", "hunter2!", Some("Sam".into()))
            .unwrap();
        flow
    }

    #[test]
    fn test_happy_path() {
        let mut flow = started_flow();
        assert_eq!(flow.state(), &FlowState::CodeRequested);

        flow.code_sent().unwrap();
        assert_eq!(flow.cooldown_remaining(), RESEND_COOLDOWN_SECS);

        flow.submit_code("1234").unwrap();
        flow.verification_succeeded().unwrap();

        assert!(flow.is_complete());
        // Credentials are gone once the flow completes
        assert!(flow.pending().is_none());
    }

    #[test]
    fn test_submit_signup_requires_credentials() {
        let mut flow = SignupFlow::new();
        assert_eq!(
            flow.submit_signup("", "pw", None),
            Err(TransitionError::MissingCredentials)
        );
        assert_eq!(
            flow.submit_signup("a@x.com", "", None),
            Err(TransitionError::MissingCredentials)
        );
        assert_eq!(flow.state(), &FlowState::Idle);
    }

    #[test]
    fn test_send_failure_returns_to_idle() {
        let mut flow = started_flow();
        flow.send_failed().unwrap();

        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.pending().is_none());
    }

    #[test]
    fn test_cooldown_blocks_resend_until_elapsed() {
        let mut flow = started_flow();
        flow.code_sent().unwrap();

        assert!(!flow.can_resend());
        assert_eq!(
            flow.resend(),
            Err(TransitionError::CooldownActive {
                remaining: RESEND_COOLDOWN_SECS
            })
        );

        for _ in 0..RESEND_COOLDOWN_SECS {
            flow.tick();
        }
        assert!(flow.can_resend());

        // Extra ticks saturate at zero
        flow.tick();
        assert_eq!(flow.cooldown_remaining(), 0);

        flow.resend().unwrap();
        assert_eq!(flow.state(), &FlowState::CodeRequested);

        // A successful resend resets the cooldown to the full value
        flow.code_sent().unwrap();
        assert_eq!(flow.cooldown_remaining(), RESEND_COOLDOWN_SECS);
    }

    #[test]
    fn test_submit_code_rejects_malformed_input() {
        let mut flow = started_flow();
        flow.code_sent().unwrap();

        for bad in ["123", "12345", "12a4", ""] {
            assert_eq!(flow.submit_code(bad), Err(TransitionError::MalformedCode));
            // Still collecting input
            assert!(matches!(flow.state(), FlowState::CodeEntry { .. }));
        }
    }

    #[test]
    fn test_failed_verification_allows_retry() {
        let mut flow = started_flow();
        flow.code_sent().unwrap();
        flow.tick();
        let cooldown_before = flow.cooldown_remaining();

        flow.submit_code("1234").unwrap();
        flow.verification_failed().unwrap();
        assert!(matches!(flow.state(), FlowState::Failed { .. }));

        flow.retry().unwrap();
        assert_eq!(
            flow.state(),
            &FlowState::CodeEntry {
                cooldown_secs: cooldown_before
            }
        );

        // Credentials survive a failed attempt
        assert!(flow.pending().is_some());
    }

    #[test]
    fn test_abandon_from_failed() {
        let mut flow = started_flow();
        flow.code_sent().unwrap();
        flow.submit_code("9999").unwrap();
        flow.verification_failed().unwrap();

        flow.abandon().unwrap();
        assert_eq!(flow.state(), &FlowState::Idle);
        assert!(flow.pending().is_none());
    }

    #[test]
    fn test_invalid_events_are_rejected() {
        let mut flow = SignupFlow::new();

        assert!(matches!(
            flow.code_sent(),
            Err(TransitionError::InvalidEvent { .. })
        ));
        assert!(matches!(
            flow.submit_code("1234"),
            Err(TransitionError::InvalidEvent { .. })
        ));
        assert!(matches!(
            flow.verification_succeeded(),
            Err(TransitionError::InvalidEvent { .. })
        ));

        let mut done = started_flow();
        done.code_sent().unwrap();
        done.submit_code("1234").unwrap();
        done.verification_succeeded().unwrap();
        assert!(matches!(
            done.abandon(),
            Err(TransitionError::InvalidEvent { .. })
        ));
    }
}
