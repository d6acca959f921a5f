//! Biometric Model

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricUserType {
    Member,
    Trainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricType {
    #[default]
    Fingerprint,
    Face,
}

impl BiometricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fingerprint => "fingerprint",
            Self::Face => "face",
        }
    }
}

/// Enrolled template; unique per (organization, user, type, finger)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biometric {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    pub user_type: BiometricUserType,
    pub biometric_type: BiometricType,
    pub finger_index: u8,
    /// Opaque device template
    pub template_data: String,
    /// 0..=100
    pub quality: u8,
    pub enrolled_by: String,
    /// Unix millis
    pub enrollment_date: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub user_type: BiometricUserType,
    #[serde(default)]
    pub biometric_type: BiometricType,
    #[serde(default)]
    #[validate(range(max = 9))]
    pub finger_index: u8,
    #[validate(length(min = 1, max = 65536))]
    pub template_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub biometric_type: BiometricType,
    #[validate(length(min = 1, max = 65536))]
    pub template_data: String,
}

/// Enrollment as listed by the API; the template never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSummary {
    pub id: String,
    pub user_id: String,
    pub user_type: BiometricUserType,
    pub biometric_type: BiometricType,
    pub finger_index: u8,
    pub quality: u8,
    pub enrolled_by: String,
    pub enrollment_date: i64,
    pub is_active: bool,
}

impl From<Biometric> for BiometricSummary {
    fn from(b: Biometric) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            user_type: b.user_type,
            biometric_type: b.biometric_type,
            finger_index: b.finger_index,
            quality: b.quality,
            enrolled_by: b.enrolled_by,
            enrollment_date: b.enrollment_date,
            is_active: b.is_active,
        }
    }
}
