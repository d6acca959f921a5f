//! Authentication Handlers
//!
//! Signup, login and logout. The session token is set as an HttpOnly
//! cookie; there is no refresh flow.

use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::models::{
    LoginRequest, Organization, OrganizationSettings, PlatformSubscription, RegisterRequest,
    User, UserResponse, UserRole,
};
use shared::util::{new_id, now_millis, today};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{CurrentUser, cookie};
use crate::core::ServerState;
use crate::db::repository::{OrganizationRepository, RepoError, UserRepository};
use crate::security_log;
use crate::services::members::discard_user;
use crate::utils::validation::{normalize_email, validate_payload};
use crate::utils::{ApiResponse, AppError, AppJson, AppResult, ErrorCode};

/// Fixed delay before answering a login, whatever the outcome
const AUTH_FIXED_DELAY_MS: u64 = 250;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    user: UserResponse,
    organization: Organization,
}

fn session_response(
    state: &ServerState,
    status: StatusCode,
    message: &str,
    user: User,
    organization: Organization,
) -> AppResult<Response> {
    let jwt = state.get_jwt_service();
    let token = jwt
        .generate_token(&user.id, &user.organization_id, user.role, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
    let cookie = cookie::session_cookie(
        &state.config.cookie_name,
        &token,
        jwt.max_age_seconds(),
        state.config.cookie_secure,
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie header: {e}")))?,
    );

    let body = ApiResponse::success_with_message(
        message,
        SessionBody {
            user: user.into(),
            organization,
        },
    );
    Ok((status, headers, body).into_response())
}

/// POST /api/auth/register - create an organization and its owner
pub async fn register(
    State(state): State<ServerState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<Response> {
    validate_payload(&req)?;
    let email = normalize_email(&req.email);
    let users = UserRepository::new(state.get_db());

    if users.find_by_email(&email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let now = now_millis();
    let organization = Organization {
        id: new_id(),
        name: req.organization_name.trim().to_string(),
        email: email.clone(),
        phone: req.phone,
        address: None,
        settings: OrganizationSettings::default(),
        subscription: PlatformSubscription::trial(today()),
        created_at: now,
        updated_at: now,
    };

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
    let user = User {
        id: new_id(),
        email,
        name: req.name.trim().to_string(),
        password_hash,
        role: UserRole::GymOwner,
        organization_id: organization.id.clone(),
        is_active: true,
        created_at: now,
    };

    // User first: the unique email index rejects a concurrent signup
    users.create(&user).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
        other => other.into(),
    })?;
    if let Err(e) = OrganizationRepository::new(state.get_db())
        .create(&organization)
        .await
    {
        discard_user(&users, &user.id).await;
        return Err(e.into());
    }

    security_log!(
        "INFO",
        "organization_registered",
        user_id = user.id.clone(),
        organization_id = organization.id.clone()
    );

    session_response(
        &state,
        StatusCode::CREATED,
        "Registration successful",
        user,
        organization,
    )
}

/// POST /api/auth/login - verify credentials and set the session cookie
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Response> {
    validate_payload(&req)?;
    let email = normalize_email(&req.email);
    let user = UserRepository::new(state.get_db())
        .find_by_email(&email)
        .await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Same error for unknown email and wrong password
    let user = match user {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            security_log!("WARN", "login_failed", email = email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        security_log!("WARN", "login_disabled", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let organization = OrganizationRepository::new(state.get_db())
        .find_by_id(&user.organization_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = user.id.clone(),
        organization_id = organization.id.clone()
    );

    session_response(&state, StatusCode::OK, "Login successful", user, organization)
}

/// POST /api/auth/logout - clear the session cookie
pub async fn logout(State(state): State<ServerState>) -> AppResult<Response> {
    let cookie = cookie::clear_cookie(&state.config.cookie_name, state.config.cookie_secure);
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie header: {e}")))?,
    );
    Ok((headers, ApiResponse::ok("Logged out")).into_response())
}

/// GET /api/auth/me - current user and organization
pub async fn me(
    State(state): State<ServerState>,
    caller: CurrentUser,
) -> AppResult<ApiResponse<SessionBody>> {
    let user = UserRepository::new(state.get_db())
        .find_by_id(&caller.user_id)
        .await?
        .filter(|u| u.organization_id == caller.organization_id && u.is_active)
        .ok_or_else(AppError::not_authenticated)?;
    let organization = OrganizationRepository::new(state.get_db())
        .find_by_id(&caller.organization_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;

    Ok(ApiResponse::success(SessionBody {
        user: user.into(),
        organization,
    }))
}
