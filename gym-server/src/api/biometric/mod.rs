//! Biometric API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/biometric", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/enroll", get(handler::list).post(handler::enroll))
        .route("/verify", post(handler::verify))
        .layer(middleware::from_fn(require_staff))
}
