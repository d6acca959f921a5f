//! Lead API Handlers
//!
//! Status changes are unrestricted; any status may follow any other.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{Lead, LeadCreate, LeadStatus, LeadUpdate};
use shared::util::{new_id, now_millis};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::LeadRepository;
use crate::db::repository::lead::{DEFAULT_PAGE_SIZE, LeadFilter};
use crate::db::scope::{PageRequest, Pagination};
use crate::utils::validation::{
    MAX_SEARCH_LEN, normalize_email, validate_optional_text, validate_payload,
};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
}

fn parse_status(status: Option<&str>) -> AppResult<Option<LeadStatus>> {
    let Some(raw) = status.map(str::trim).filter(|s| !s.is_empty() && *s != "all") else {
        return Ok(None);
    };
    serde_json::from_value(serde_json::Value::from(raw))
        .map(Some)
        .map_err(|_| {
            AppError::validation(format!("Unknown status: {raw}"))
                .with_detail("fields", vec!["status"])
        })
}

#[derive(Debug, Serialize)]
pub struct LeadList {
    leads: Vec<Lead>,
    pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct LeadBody {
    lead: Lead,
}

fn lead_not_found() -> AppError {
    AppError::new(ErrorCode::LeadNotFound)
}

/// GET /api/leads - paginated list, newest first
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<LeadList>> {
    validate_optional_text(&query.search, "search", MAX_SEARCH_LEN)?;
    let filter = LeadFilter {
        search: query.search,
        status: parse_status(query.status.as_deref())?,
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    let leads = LeadRepository::new(state.get_db())
        .list(&caller.organization_id, &filter, page)
        .await?;
    Ok(ApiResponse::success(LeadList {
        pagination: leads.pagination(),
        leads: leads.items,
    }))
}

/// POST /api/leads
pub async fn create(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<LeadCreate>,
) -> AppResult<(StatusCode, ApiResponse<LeadBody>)> {
    validate_payload(&payload)?;
    let now = now_millis();
    let lead = Lead {
        id: new_id(),
        organization_id: caller.organization_id.clone(),
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        email: payload.email.as_deref().map(normalize_email),
        source: payload.source,
        status: payload.status,
        follow_up_date: payload.follow_up_date,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };
    LeadRepository::new(state.get_db()).create(&lead).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Lead created successfully", LeadBody { lead }),
    ))
}

/// GET /api/leads/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LeadBody>> {
    let lead = LeadRepository::new(state.get_db())
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(lead_not_found)?;
    Ok(ApiResponse::success(LeadBody { lead }))
}

/// PUT /api/leads/{id}
pub async fn update(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<LeadUpdate>,
) -> AppResult<ApiResponse<LeadBody>> {
    validate_payload(&payload)?;
    let repo = LeadRepository::new(state.get_db());
    let mut lead = repo
        .find_by_id(&caller.organization_id, &id)
        .await?
        .ok_or_else(lead_not_found)?;

    if let Some(name) = payload.name {
        lead.name = name.trim().to_string();
    }
    if let Some(phone) = payload.phone {
        lead.phone = phone.trim().to_string();
    }
    if let Some(email) = payload.email {
        lead.email = Some(normalize_email(&email));
    }
    if let Some(source) = payload.source {
        lead.source = Some(source);
    }
    if let Some(status) = payload.status {
        lead.status = status;
    }
    if let Some(date) = payload.follow_up_date {
        lead.follow_up_date = Some(date);
    }
    if let Some(notes) = payload.notes {
        lead.notes = Some(notes);
    }
    lead.updated_at = now_millis();

    if !repo.save(&lead).await? {
        return Err(lead_not_found());
    }
    Ok(ApiResponse::success_with_message(
        "Lead updated successfully",
        LeadBody { lead },
    ))
}

/// DELETE /api/leads/{id}
pub async fn delete(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    if !LeadRepository::new(state.get_db())
        .delete(&caller.organization_id, &id)
        .await?
    {
        return Err(lead_not_found());
    }
    Ok(ApiResponse::ok("Lead deleted successfully"))
}
