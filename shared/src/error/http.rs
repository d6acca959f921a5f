//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found (cross-tenant lookups land here too)
            Self::NotFound
            | Self::OrganizationNotFound
            | Self::MemberNotFound
            | Self::PaymentNotFound
            | Self::AttendanceNotFound
            | Self::PlanNotFound
            | Self::LeadNotFound
            | Self::TrainerNotFound
            | Self::BiometricNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::EmailAlreadyRegistered | Self::ConcurrentModification => {
                StatusCode::CONFLICT
            }

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::OwnerRequired | Self::StaffRequired => {
                StatusCode::FORBIDDEN
            }

            Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and business rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
