//! Server bootstrap: configuration, tracing, dependency wiring.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use gu_api::app::configure_api;
use gu_api::middleware::cors::create_cors;
use gu_api::routes::auth::AppState;
use gu_core::services::otp::{OtpIssuer, OtpServiceConfig, OtpVerifier};
use gu_infra::database::{DatabasePool, MySqlOtpRepository};
use gu_infra::email::{create_mail_sender, MailSenderImpl};
use gu_infra::identity::{create_identity_provider, IdentityProviderImpl};
use gu_shared::config::AppConfig;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config);

    tracing::info!(
        environment = %config.environment,
        "Starting Grade Up API server"
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database pool")?;
    pool.health_check()
        .await
        .context("database is unreachable")?;

    let repository = Arc::new(MySqlOtpRepository::new(pool.inner().clone()));
    let mail_sender = Arc::new(create_mail_sender(&config.email));
    let identity = Arc::new(create_identity_provider(&config.identity));

    let otp_config = OtpServiceConfig {
        code_expiration_minutes: config.otp.code_expiration_minutes,
        resend_cooldown_seconds: config.otp.resend_cooldown_seconds,
        expose_code: config.expose_code_enabled(),
    };
    if otp_config.expose_code {
        tracing::warn!("Passcode echo is enabled; issuance responses will contain raw codes");
    }

    let issuer = Arc::new(OtpIssuer::new(
        repository.clone(),
        mail_sender,
        otp_config,
    ));
    let verifier = Arc::new(OtpVerifier::new(repository, identity.clone()));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    let cors_config = config.cors.clone();
    let workers = config.server.workers;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(create_cors(&cors_config))
            .app_data(web::Data::new(AppState {
                issuer: issuer.clone(),
                verifier: verifier.clone(),
                identity: identity.clone(),
            }))
            .configure(
                configure_api::<MySqlOtpRepository, MailSenderImpl, IdentityProviderImpl>,
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await.context("server terminated")?;
    Ok(())
}
