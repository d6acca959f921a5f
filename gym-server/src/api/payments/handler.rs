//! Payment API Handlers

use axum::{extract::State, http::StatusCode};
use shared::models::PaymentCreate;
use shared::util::today;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::PaymentRecorder;
use crate::services::payments::{PaymentOverview, RecordedPayment};
use crate::utils::{ApiResponse, AppJson, AppResult};

/// GET /api/payments - the 100 most recent payments and revenue totals
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
) -> AppResult<ApiResponse<PaymentOverview>> {
    let overview = PaymentRecorder::new(state.get_db())
        .overview(&caller.organization_id, today())
        .await?;
    Ok(ApiResponse::success(overview))
}

/// POST /api/payments - record a payment; membership/renewal payments
/// extend the member's subscription
pub async fn record(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<PaymentCreate>,
) -> AppResult<(StatusCode, ApiResponse<RecordedPayment>)> {
    let recorded = PaymentRecorder::new(state.get_db())
        .record(&caller, payload, today())
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Payment recorded successfully", recorded),
    ))
}
