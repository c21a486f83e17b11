use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::handlers;
use crate::config::{AppConfig, CorsConfig};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Examples shown to annotators
        .route("/examples", get(handlers::list_examples::<S>))
        // Annotation submission and export
        .route("/annotations", post(handlers::create_annotation::<S>))
        .route("/export", get(handlers::export_annotations::<S>))
}

/// Browser-facing cross-origin policy. Only the configured origins may call
/// the API; methods and headers are fixed.
pub fn cors_layer(cors: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .max_age(Duration::from_secs(12 * 60 * 60)))
}

/// The full application: routes, CORS and state
pub fn create_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<Router> {
    Ok(create_router::<S>()
        .layer(cors_layer(&config.cors)?)
        .with_state(store))
}
