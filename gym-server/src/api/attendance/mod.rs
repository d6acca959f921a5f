//! Attendance API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/attendance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::check_in))
        .route("/{id}/checkout", put(handler::check_out))
        .layer(middleware::from_fn(require_staff))
}
