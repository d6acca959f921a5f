//! Payment API

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/payments", get(handler::list).post(handler::record))
        .route_layer(middleware::from_fn(require_staff))
}
