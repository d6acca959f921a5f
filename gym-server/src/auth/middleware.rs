//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, cookie};
use crate::core::ServerState;
use crate::security_log;

/// Routes reachable without a credential
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/register", "/api/auth/logout"];

/// Require a valid credential on `/api/` routes
///
/// The token is read from the auth cookie (or a Bearer header). On success a
/// [`CurrentUser`] is inserted into the request extensions.
///
/// Skipped for `OPTIONS` preflight, non-API paths (`/health`) and the
/// public auth routes.
///
/// | Failure | Code |
/// |---------|------|
/// | no credential | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | bad signature / malformed | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Verify the request credential and build the caller context
pub(crate) fn authenticate(
    state: &ServerState,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let Some(token) = cookie::extract_token(headers, &state.config.cookie_name) else {
        security_log!("WARN", "auth_missing", uri = uri.to_string());
        return Err(AppError::not_authenticated());
    };

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = uri.to_string()
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed token claims: {e}")))
}

/// Reject callers that are not the gym owner
pub async fn require_owner(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.is_owner() {
        security_log!(
            "WARN",
            "owner_required",
            user_id = user.user_id.clone(),
            uri = req.uri().to_string()
        );
        return Err(AppError::new(crate::ErrorCode::OwnerRequired));
    }

    Ok(next.run(req).await)
}

/// Reject `member` logins; staff routes expose every member of the gym
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.is_staff() {
        security_log!(
            "WARN",
            "staff_required",
            user_id = user.user_id.clone(),
            uri = req.uri().to_string()
        );
        return Err(AppError::new(crate::ErrorCode::StaffRequired));
    }

    Ok(next.run(req).await)
}
