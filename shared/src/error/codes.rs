//! Unified error codes for the gym platform
//!
//! Every failure that leaves `gym-server` carries one of these codes.
//! Codes are grouped by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Organization errors
//! - 4xxx: Member and subscription errors
//! - 5xxx: Payment errors
//! - 6xxx: Attendance errors
//! - 7xxx: Catalog errors (plans, leads, trainers)
//! - 8xxx: Biometric errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a bare `u16` so clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Resource changed while the request was being applied
    ConcurrentModification = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,
    AccountDisabled = 1007,
    EmailAlreadyRegistered = 1008,

    // ==================== 2xxx: Permission ====================
    PermissionDenied = 2001,
    /// Only the gym owner may perform this action
    OwnerRequired = 2002,
    /// Gym owner or trainer role is required
    StaffRequired = 2003,

    // ==================== 3xxx: Organization ====================
    OrganizationNotFound = 3001,

    // ==================== 4xxx: Member ====================
    MemberNotFound = 4001,
    SubscriptionNotActive = 4002,
    InvalidSubscriptionDates = 4003,

    // ==================== 5xxx: Payment ====================
    PaymentInvalidAmount = 5001,
    PaymentNotFound = 5002,

    // ==================== 6xxx: Attendance ====================
    AlreadyCheckedIn = 6001,
    AttendanceNotFound = 6002,
    AlreadyCheckedOut = 6003,

    // ==================== 7xxx: Catalog ====================
    PlanNotFound = 7001,
    LeadNotFound = 7101,
    TrainerNotFound = 7201,

    // ==================== 8xxx: Biometric ====================
    BiometricNotFound = 8001,
    BiometricQualityTooLow = 8002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ConcurrentModification => "Resource was modified concurrently, please retry",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OwnerRequired => "Gym owner role is required",
            ErrorCode::StaffRequired => "Staff role is required",

            // Organization
            ErrorCode::OrganizationNotFound => "Organization not found",

            // Member
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::SubscriptionNotActive => "Subscription is not active",
            ErrorCode::InvalidSubscriptionDates => "Subscription end date must follow start date",

            // Payment
            ErrorCode::PaymentInvalidAmount => "Payment amount must be positive",
            ErrorCode::PaymentNotFound => "Payment not found",

            // Attendance
            ErrorCode::AlreadyCheckedIn => "Member already checked in today",
            ErrorCode::AttendanceNotFound => "Attendance record not found",
            ErrorCode::AlreadyCheckedOut => "Member already checked out",

            // Catalog
            ErrorCode::PlanNotFound => "Plan not found",
            ErrorCode::LeadNotFound => "Lead not found",
            ErrorCode::TrainerNotFound => "Trainer not found",

            // Biometric
            ErrorCode::BiometricNotFound => "No biometric enrolled",
            ErrorCode::BiometricQualityTooLow => "Biometric sample quality too low",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::ConcurrentModification,
            7 => ErrorCode::RequiredField,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1007 => ErrorCode::AccountDisabled,
            1008 => ErrorCode::EmailAlreadyRegistered,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::OwnerRequired,
            2003 => ErrorCode::StaffRequired,

            3001 => ErrorCode::OrganizationNotFound,

            4001 => ErrorCode::MemberNotFound,
            4002 => ErrorCode::SubscriptionNotActive,
            4003 => ErrorCode::InvalidSubscriptionDates,

            5001 => ErrorCode::PaymentInvalidAmount,
            5002 => ErrorCode::PaymentNotFound,

            6001 => ErrorCode::AlreadyCheckedIn,
            6002 => ErrorCode::AttendanceNotFound,
            6003 => ErrorCode::AlreadyCheckedOut,

            7001 => ErrorCode::PlanNotFound,
            7101 => ErrorCode::LeadNotFound,
            7201 => ErrorCode::TrainerNotFound,

            8001 => ErrorCode::BiometricNotFound,
            8002 => ErrorCode::BiometricQualityTooLow,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9004 => ErrorCode::TimeoutError,
            9005 => ErrorCode::ConfigError,

            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::MemberNotFound.code(), 4001);
        assert_eq!(ErrorCode::AlreadyCheckedIn.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_known_and_unknown() {
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::SubscriptionNotActive));
        assert_eq!(ErrorCode::try_from(7201), Ok(ErrorCode::TrainerNotFound));
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::AlreadyCheckedIn).unwrap();
        assert_eq!(json, "6001");
        let back: ErrorCode = serde_json::from_str("1003").unwrap();
        assert_eq!(back, ErrorCode::TokenExpired);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
