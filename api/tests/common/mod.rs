//! Shared helpers for the API integration tests

use actix_web::web;
use std::sync::Arc;

use gu_api::routes::auth::AppState;
use gu_core::repositories::MockOtpRepository;
use gu_core::services::otp::{OtpIssuer, OtpServiceConfig, OtpVerifier};
use gu_infra::email::MockMailer;
use gu_infra::identity::MockIdentityProvider;

/// Handles to the in-memory collaborators behind a test app
pub struct TestContext {
    pub repository: Arc<MockOtpRepository>,
    pub mailer: Arc<MockMailer>,
    pub identity: Arc<MockIdentityProvider>,
}

pub type TestAppState = AppState<MockOtpRepository, MockMailer, MockIdentityProvider>;

/// Build an AppState over in-memory collaborators, returning the
/// collaborator handles for assertions.
pub fn test_state(config: OtpServiceConfig) -> (web::Data<TestAppState>, TestContext) {
    let repository = Arc::new(MockOtpRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let identity = Arc::new(MockIdentityProvider::new());

    let issuer = Arc::new(OtpIssuer::new(
        repository.clone(),
        mailer.clone(),
        config,
    ));
    let verifier = Arc::new(OtpVerifier::new(repository.clone(), identity.clone()));

    let state = web::Data::new(AppState {
        issuer,
        verifier,
        identity: identity.clone(),
    });

    (
        state,
        TestContext {
            repository,
            mailer,
            identity,
        },
    )
}

/// Default-configured state
pub fn default_state() -> (web::Data<TestAppState>, TestContext) {
    test_state(OtpServiceConfig::default())
}
