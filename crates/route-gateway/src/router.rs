//! Gateway router - static pages, health check and the `/route` relay
//!
//! Only one `/route` handler is registered per process, chosen by the
//! configured [`Backend`]. The static routes share nothing with it.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{self, LocalState, RemoteState};
use crate::config::AppConfig;
use crate::upstream::Backend;

/// Create the gateway router for the given collaborator.
///
/// `/route` bodies are capped at `max_body_bytes` instead of axum's 2 MB
/// default; a larger body is answered with 413.
pub fn create_gateway_router(config: &AppConfig, backend: Backend) -> Router {
    let route_api: Router = match backend {
        Backend::Local(sidecar) => Router::new()
            .route("/route", get(api::route_local).post(api::route_local))
            .with_state(Arc::new(LocalState { sidecar })),
        Backend::Remote {
            invoker,
            function_name,
        } => Router::new()
            .route("/route", get(api::route_remote).post(api::route_remote))
            .with_state(Arc::new(RemoteState {
                invoker,
                function_name,
            })),
    }
    .layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        .route("/health", get(health_check))
        .route_service("/", ServeFile::new(&config.index_file))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .merge(route_api)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint for the gateway
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
