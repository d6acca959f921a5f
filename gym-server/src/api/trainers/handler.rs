//! Trainer API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{Trainer, TrainerCreate, TrainerUpdate};
use shared::util::{new_id, now_millis};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::TrainerRepository;
use crate::utils::validation::{
    MAX_SEARCH_LEN, normalize_email, validate_optional_text, validate_payload,
};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrainerList {
    trainers: Vec<Trainer>,
}

#[derive(Debug, Serialize)]
pub struct TrainerBody {
    trainer: Trainer,
}

fn trainer_not_found() -> AppError {
    AppError::new(ErrorCode::TrainerNotFound)
}

/// GET /api/trainers - trainers by name
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<TrainerList>> {
    validate_optional_text(&query.search, "search", MAX_SEARCH_LEN)?;
    let trainers = TrainerRepository::new(state.get_db())
        .list(&caller.organization_id, query.search.as_deref())
        .await?;
    Ok(ApiResponse::success(TrainerList { trainers }))
}

/// GET /api/trainers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TrainerBody>> {
    let trainer = TrainerRepository::new(state.get_db())
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(trainer_not_found)?;
    Ok(ApiResponse::success(TrainerBody { trainer }))
}

/// POST /api/trainers (owner only)
pub async fn create(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<TrainerCreate>,
) -> AppResult<(StatusCode, ApiResponse<TrainerBody>)> {
    validate_payload(&payload)?;
    let now = now_millis();
    let trainer = Trainer {
        id: new_id(),
        organization_id: caller.organization_id.clone(),
        user_id: None,
        name: payload.name.trim().to_string(),
        email: payload.email.as_deref().map(normalize_email),
        phone: payload.phone.trim().to_string(),
        specialization: payload.specialization,
        experience_years: payload.experience_years,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    TrainerRepository::new(state.get_db()).create(&trainer).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Trainer created successfully", TrainerBody { trainer }),
    ))
}

/// PUT /api/trainers/{id} (owner only)
pub async fn update(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TrainerUpdate>,
) -> AppResult<ApiResponse<TrainerBody>> {
    validate_payload(&payload)?;
    let repo = TrainerRepository::new(state.get_db());
    let mut trainer = repo
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(trainer_not_found)?;

    if let Some(name) = payload.name {
        trainer.name = name.trim().to_string();
    }
    if let Some(email) = payload.email {
        trainer.email = Some(normalize_email(&email));
    }
    if let Some(phone) = payload.phone {
        trainer.phone = phone.trim().to_string();
    }
    if let Some(specialization) = payload.specialization {
        trainer.specialization = Some(specialization);
    }
    if let Some(years) = payload.experience_years {
        trainer.experience_years = Some(years);
    }
    if let Some(is_active) = payload.is_active {
        trainer.is_active = is_active;
    }
    trainer.updated_at = now_millis();

    if !repo.save(&trainer).await? {
        return Err(trainer_not_found());
    }
    Ok(ApiResponse::success_with_message(
        "Trainer updated successfully",
        TrainerBody { trainer },
    ))
}

/// DELETE /api/trainers/{id} (owner only)
pub async fn delete(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    if !TrainerRepository::new(state.get_db())
        .delete(&caller.organization_id, &id)
        .await?
    {
        return Err(trainer_not_found());
    }
    Ok(ApiResponse::ok("Trainer deleted successfully"))
}
