//! Organization API Handlers

use axum::extract::State;
use serde::Serialize;
use shared::models::{Organization, OrganizationUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrganizationRepository;
use crate::utils::validation::{normalize_email, validate_payload};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode};

#[derive(Debug, Serialize)]
pub struct OrganizationBody {
    organization: Organization,
}

/// GET /api/organization - profile and settings of the caller's gym
pub async fn get(
    State(state): State<ServerState>,
    caller: CurrentUser,
) -> AppResult<ApiResponse<OrganizationBody>> {
    let organization = OrganizationRepository::new(state.get_db())
        .find_by_id(&caller.organization_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;
    Ok(ApiResponse::success(OrganizationBody { organization }))
}

/// PUT /api/organization - edit profile and settings (owner only)
pub async fn update(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<OrganizationUpdate>,
) -> AppResult<ApiResponse<OrganizationBody>> {
    validate_payload(&payload)?;
    let repo = OrganizationRepository::new(state.get_db());
    let mut organization = repo
        .find_by_id(&caller.organization_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;

    if let Some(name) = payload.name {
        organization.name = name.trim().to_string();
    }
    if let Some(email) = payload.email {
        organization.email = normalize_email(&email);
    }
    if let Some(phone) = payload.phone {
        organization.phone = Some(phone);
    }
    if let Some(address) = payload.address {
        organization.address = Some(address);
    }
    if let Some(settings) = payload.settings {
        organization.settings.apply(settings);
    }
    organization.updated_at = now_millis();

    repo.save(&organization).await?;
    tracing::info!(organization_id = %organization.id, "Organization updated");

    Ok(ApiResponse::success_with_message(
        "Organization updated",
        OrganizationBody { organization },
    ))
}
