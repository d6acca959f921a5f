//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness and database ping (public)
//! - [`auth`] - register, login, logout, current user
//! - [`organization`] - gym profile and settings
//! - [`members`] - members and the auto-suspend action
//! - [`plans`] - membership plans
//! - [`leads`] - prospective members
//! - [`trainers`] - staff trainers
//! - [`attendance`] - check-in / check-out
//! - [`biometric`] - enrollment and verification
//! - [`dashboard`] - aggregate counts and activity feed
//! - [`payments`] - payment recorder and revenue
//! - [`whatsapp`] - message templates

pub mod attendance;
pub mod auth;
pub mod biometric;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod members;
pub mod organization;
pub mod payments;
pub mod plans;
pub mod trainers;
pub mod whatsapp;

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// HTTP access log
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

/// All routes, without state or middleware
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(organization::router())
        .merge(members::router())
        .merge(plans::router())
        .merge(leads::router())
        .merge(trainers::router())
        .merge(attendance::router())
        .merge(biometric::router())
        .merge(dashboard::router())
        .merge(payments::router())
        .merge(whatsapp::router())
}

/// Fully configured application: routes, tenant guard, state and tower layers
pub fn build_router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_app()
        // require_auth skips /health, the public auth routes and preflight
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
