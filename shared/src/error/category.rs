//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category derived from the leading digit of the error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Organization errors (3xxx)
    Organization,
    /// Member and subscription errors (4xxx)
    Member,
    /// Payment errors (5xxx)
    Payment,
    /// Attendance errors (6xxx)
    Attendance,
    /// Plan, lead and trainer errors (7xxx)
    Catalog,
    /// Biometric errors (8xxx)
    Biometric,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Organization,
            4000..5000 => Self::Member,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Attendance,
            7000..8000 => Self::Catalog,
            8000..9000 => Self::Biometric,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Organization => "organization",
            Self::Member => "member",
            Self::Payment => "payment",
            Self::Attendance => "attendance",
            Self::Catalog => "catalog",
            Self::Biometric => "biometric",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Organization);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Member);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Attendance);
        assert_eq!(ErrorCategory::from_code(7101), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Biometric);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::SubscriptionNotActive.category(), ErrorCategory::Member);
        assert_eq!(ErrorCode::AlreadyCheckedIn.category(), ErrorCategory::Attendance);
        assert_eq!(ErrorCode::LeadNotFound.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::Organization.name(), "organization");
        assert_eq!(ErrorCategory::Biometric.name(), "biometric");
    }
}
