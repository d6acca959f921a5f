//! Member API
//!
//! Every route needs a staff role (owner or trainer).
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/members | GET | paginated; `search`, `status`, `page`, `limit` |
//! | /api/members | POST | 201 on success |
//! | /api/members/{id} | GET, PUT | |
//! | /api/members/{id} | DELETE | owner only |
//! | /api/members/suspend-expired | POST | owner only |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{require_owner, require_staff};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/members", routes())
}

fn routes() -> Router<ServerState> {
    let staff_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update));

    let owner_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .route("/suspend-expired", post(handler::suspend_expired))
        .layer(middleware::from_fn(require_owner));

    staff_routes
        .merge(owner_routes)
        .layer(middleware::from_fn(require_staff))
}
