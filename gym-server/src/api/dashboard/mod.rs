//! Dashboard API

use axum::{Router, extract::State, middleware, routing::get};
use shared::util::today;

use crate::auth::{CurrentUser, require_staff};
use crate::core::ServerState;
use crate::services::DashboardService;
use crate::services::dashboard::Dashboard;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dashboard/stats", get(stats))
        .route_layer(middleware::from_fn(require_staff))
}

/// GET /api/dashboard/stats - aggregate counts and recent activity
async fn stats(
    State(state): State<ServerState>,
    caller: CurrentUser,
) -> AppResult<ApiResponse<Dashboard>> {
    let dashboard = DashboardService::new(state.get_db())
        .load(&caller.organization_id, today())
        .await?;
    Ok(ApiResponse::success(dashboard))
}
