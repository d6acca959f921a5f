//! Attendance API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Attendance, CheckInRequest};
use shared::util::today;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::AttendanceService;
use crate::utils::time::parse_date;
use crate::utils::{ApiResponse, AppJson, AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// `YYYY-MM-DD`; defaults to today
    pub date: Option<String>,
    pub member_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceList {
    date: NaiveDate,
    attendance: Vec<Attendance>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceBody {
    attendance: Attendance,
}

/// GET /api/attendance - check-ins of one day, latest first
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<AttendanceList>> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let attendance = AttendanceService::new(state.get_db())
        .list(&caller.organization_id, date, query.member_id.as_deref())
        .await?;
    Ok(ApiResponse::success(AttendanceList { date, attendance }))
}

/// POST /api/attendance - check a member in for today
pub async fn check_in(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(req): AppJson<CheckInRequest>,
) -> AppResult<(StatusCode, ApiResponse<AttendanceBody>)> {
    let attendance = AttendanceService::new(state.get_db())
        .check_in(&caller, req, today())
        .await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success_with_message("Check-in successful", AttendanceBody { attendance }),
    ))
}

/// PUT /api/attendance/{id}/checkout - record the check-out time
pub async fn check_out(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttendanceBody>> {
    let attendance = AttendanceService::new(state.get_db())
        .check_out(&caller.organization_id, &id)
        .await?;
    Ok(ApiResponse::success_with_message(
        "Check-out successful",
        AttendanceBody { attendance },
    ))
}
