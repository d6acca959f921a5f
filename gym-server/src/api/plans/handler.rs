//! Plan API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{Plan, PlanCreate, PlanUpdate};
use shared::util::{new_id, now_millis};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::PlanRepository;
use crate::utils::validation::{validate_non_negative, validate_payload};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Hide retired plans
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanList {
    plans: Vec<Plan>,
}

#[derive(Debug, Serialize)]
pub struct PlanBody {
    plan: Plan,
}

fn plan_not_found() -> AppError {
    AppError::new(ErrorCode::PlanNotFound)
}

/// GET /api/plans - plans ordered by price
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<PlanList>> {
    let plans = PlanRepository::new(state.get_db())
        .list(&caller.organization_id, query.active_only)
        .await?;
    Ok(ApiResponse::success(PlanList { plans }))
}

/// GET /api/plans/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PlanBody>> {
    let plan = PlanRepository::new(state.get_db())
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(plan_not_found)?;
    Ok(ApiResponse::success(PlanBody { plan }))
}

/// POST /api/plans - create a plan (owner only)
pub async fn create(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<PlanCreate>,
) -> AppResult<(StatusCode, ApiResponse<PlanBody>)> {
    validate_payload(&payload)?;
    validate_non_negative(payload.amount, "amount")?;

    let now = now_millis();
    let plan = Plan {
        id: new_id(),
        organization_id: caller.organization_id.clone(),
        name: payload.name.trim().to_string(),
        description: payload.description,
        duration: payload.duration,
        duration_type: payload.duration_type,
        amount: payload.amount,
        features: payload.features,
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };
    PlanRepository::new(state.get_db()).create(&plan).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Plan created successfully", PlanBody { plan }),
    ))
}

/// PUT /api/plans/{id} - edit a plan (owner only)
///
/// Existing member subscriptions keep the terms they were sold with.
pub async fn update(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<PlanUpdate>,
) -> AppResult<ApiResponse<PlanBody>> {
    validate_payload(&payload)?;
    let repo = PlanRepository::new(state.get_db());
    let mut plan = repo
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(plan_not_found)?;

    if let Some(name) = payload.name {
        plan.name = name.trim().to_string();
    }
    if let Some(description) = payload.description {
        plan.description = Some(description);
    }
    if let Some(duration) = payload.duration {
        plan.duration = duration;
    }
    if let Some(duration_type) = payload.duration_type {
        plan.duration_type = duration_type;
    }
    if let Some(amount) = payload.amount {
        validate_non_negative(amount, "amount")?;
        plan.amount = amount;
    }
    if let Some(features) = payload.features {
        plan.features = features;
    }
    if let Some(is_active) = payload.is_active {
        plan.is_active = is_active;
    }
    plan.updated_at = now_millis();

    if !repo.save(&plan).await? {
        return Err(plan_not_found());
    }
    Ok(ApiResponse::success_with_message(
        "Plan updated successfully",
        PlanBody { plan },
    ))
}

/// DELETE /api/plans/{id} (owner only)
pub async fn delete(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    if !PlanRepository::new(state.get_db())
        .delete(&caller.organization_id, &id)
        .await?
    {
        return Err(plan_not_found());
    }
    Ok(ApiResponse::ok("Plan deleted successfully"))
}
