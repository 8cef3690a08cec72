//! Integration tests for POST /api/v1/auth/login

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};

use common::default_state;
use gu_api::app::configure_api;
use gu_core::repositories::MockOtpRepository;
use gu_core::services::otp::traits::IdentityProvider;
use gu_infra::email::MockMailer;
use gu_infra::identity::MockIdentityProvider;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new().app_data($state.clone()).configure(
                configure_api::<MockOtpRepository, MockMailer, MockIdentityProvider>,
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_login_returns_provider_session() {
    let (state, ctx) = default_state();
    ctx.identity
        .create_user("student@gradeup.study", "hunter2!", Some("Sam"))
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "student@gradeup.study", "password": "hunter2!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["session"]["access_token"].is_string());
    assert_eq!(body["session"]["token_type"], json!("bearer"));
}

#[actix_web::test]
async fn test_login_rejected_credentials_are_401() {
    let (state, ctx) = default_state();
    ctx.identity
        .create_user("student@gradeup.study", "right-password", None)
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "student@gradeup.study", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid login credentials"));
}

#[actix_web::test]
async fn test_login_unknown_account_is_401() {
    let (state, _ctx) = default_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@gradeup.study", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (state, _ctx) = default_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("gradeup-api"));
}
