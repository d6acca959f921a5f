//! Member API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::models::{MemberCreate, MemberUpdate, MemberView, SubscriptionStatus};
use shared::util::{now_millis, today};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::member::{DEFAULT_PAGE_SIZE, MemberFilter};
use crate::db::scope::{PageRequest, Pagination};
use crate::membership::{MembershipService, SuspendOutcome};
use crate::services::MemberService;
use crate::services::members::MemberCreated;
use crate::utils::validation::{MAX_SEARCH_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult};

/// Query string of the member list; unknown keys are ignored
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    /// `active` | `expired` | `suspended`; `all` or empty means no filter
    pub status: Option<String>,
}

fn parse_status(status: Option<&str>) -> AppResult<Option<SubscriptionStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some("active") => Ok(Some(SubscriptionStatus::Active)),
        Some("expired") => Ok(Some(SubscriptionStatus::Expired)),
        Some("suspended") => Ok(Some(SubscriptionStatus::Suspended)),
        Some(other) => Err(AppError::validation(format!("Unknown status: {other}"))
            .with_detail("fields", vec!["status"])),
    }
}

#[derive(Debug, Serialize)]
pub struct MemberList {
    members: Vec<MemberView>,
    pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct MemberBody {
    member: MemberView,
}

/// GET /api/members - paginated list, newest first
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<MemberList>> {
    validate_optional_text(&query.search, "search", MAX_SEARCH_LEN)?;
    let filter = MemberFilter {
        search: query.search,
        status: parse_status(query.status.as_deref())?,
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    let members = MemberService::new(state.get_db())
        .list(&caller.organization_id, &filter, page, today())
        .await?;
    Ok(ApiResponse::success(MemberList {
        pagination: members.pagination(),
        members: members.items,
    }))
}

/// POST /api/members - create a member and start the subscription
pub async fn create(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(payload): AppJson<MemberCreate>,
) -> AppResult<(StatusCode, ApiResponse<MemberCreated>)> {
    let created = MemberService::new(state.get_db())
        .create(&caller, payload, today())
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Member created successfully", created),
    ))
}

/// GET /api/members/{id} - one member with `daysUntilExpiry`
pub async fn get_by_id(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MemberBody>> {
    let member = MemberService::new(state.get_db())
        .get(&caller.organization_id, &id, today())
        .await?;
    Ok(ApiResponse::success(MemberBody { member }))
}

/// PUT /api/members/{id} - edit profile or subscription
pub async fn update(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MemberUpdate>,
) -> AppResult<ApiResponse<MemberBody>> {
    let member = MemberService::new(state.get_db())
        .update(&caller.organization_id, &id, payload, today())
        .await?;
    Ok(ApiResponse::success_with_message(
        "Member updated successfully",
        MemberBody { member },
    ))
}

/// DELETE /api/members/{id}
pub async fn delete(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    MemberService::new(state.get_db())
        .delete(&caller.organization_id, &id)
        .await?;
    Ok(ApiResponse::ok("Member deleted successfully"))
}

/// POST /api/members/suspend-expired - apply the auto-suspend setting now
pub async fn suspend_expired(
    State(state): State<ServerState>,
    caller: CurrentUser,
) -> AppResult<ApiResponse<SuspendOutcome>> {
    let outcome = MembershipService::new(state.get_db())
        .suspend_expired(&caller.organization_id, today(), now_millis())
        .await?;
    let message = if outcome.enabled {
        format!("{} member(s) suspended", outcome.suspended)
    } else {
        "Auto-suspend is disabled for this organization".to_string()
    };
    Ok(ApiResponse::success_with_message(message, outcome))
}
