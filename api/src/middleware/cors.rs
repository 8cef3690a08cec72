//! CORS middleware configuration
//!
//! The auth endpoints are called straight from browsers and mobile
//! webviews, so the API answers pre-flight requests and sends
//! permissive CORS headers. Production deployments can pin origins
//! through `CorsConfig.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use gu_shared::config::CorsConfig;

/// Create the CORS middleware from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("apikey"),
            header::HeaderName::from_static("x-client-info"),
        ])
        .max_age(config.max_age as usize);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
