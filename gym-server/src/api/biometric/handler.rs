//! Biometric API Handlers
//!
//! Templates are accepted on enroll/verify but never returned.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shared::models::{BiometricSummary, EnrollRequest, VerifyRequest};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::BiometricService;
use crate::services::biometric::Verification;
use crate::utils::{ApiResponse, AppJson, AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BiometricList {
    biometrics: Vec<BiometricSummary>,
}

#[derive(Debug, Serialize)]
pub struct BiometricBody {
    biometric: BiometricSummary,
}

fn service(state: &ServerState) -> BiometricService {
    BiometricService::new(state.get_db(), state.biometric.clone())
}

/// GET /api/biometric/enroll - enrollments, optionally for one user
pub async fn list(
    State(state): State<ServerState>,
    caller: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<BiometricList>> {
    let biometrics = service(&state)
        .list(&caller.organization_id, query.user_id.as_deref())
        .await?
        .into_iter()
        .map(BiometricSummary::from)
        .collect();
    Ok(ApiResponse::success(BiometricList { biometrics }))
}

/// POST /api/biometric/enroll - enroll or re-enroll a template
pub async fn enroll(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(req): AppJson<EnrollRequest>,
) -> AppResult<ApiResponse<BiometricBody>> {
    let biometric = service(&state).enroll(&caller, req).await?;
    Ok(ApiResponse::success_with_message(
        "Biometric enrolled successfully",
        BiometricBody {
            biometric: biometric.into(),
        },
    ))
}

/// POST /api/biometric/verify - match a template against enrollments
pub async fn verify(
    State(state): State<ServerState>,
    caller: CurrentUser,
    AppJson(req): AppJson<VerifyRequest>,
) -> AppResult<ApiResponse<Verification>> {
    let outcome = service(&state)
        .verify(&caller.organization_id, req)
        .await?;
    let message = if outcome.verified {
        "Verification successful"
    } else {
        "Verification failed"
    };
    Ok(ApiResponse::success_with_message(message, outcome))
}
