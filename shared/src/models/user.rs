//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login role within an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    GymOwner,
    Trainer,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GymOwner => "gym_owner",
            Self::Trainer => "trainer",
            Self::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gym_owner" => Some(Self::GymOwner),
            "trainer" => Some(Self::Trainer),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

/// Stored user document (carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Lowercased; unique across the platform
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub organization_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// User as returned by the API (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub organization_id: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            organization_id: user.organization_id,
            is_active: user.is_active,
        }
    }
}

/// Gym owner signup: creates the organization and its owner login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 120))]
    #[serde(alias = "gymName")]
    pub organization_name: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}
