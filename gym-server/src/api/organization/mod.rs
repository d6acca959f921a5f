//! Organization API

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_owner;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/organization", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::get));

    let write_routes = Router::new()
        .route("/", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_owner));

    read_routes.merge(write_routes)
}
