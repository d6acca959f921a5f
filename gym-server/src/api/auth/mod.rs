//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register | POST | none |
//! | /api/auth/login | POST | none |
//! | /api/auth/logout | POST | none |
//! | /api/auth/me | GET | cookie |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
}
