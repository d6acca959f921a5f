//! Attendance Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInMethod {
    #[default]
    Manual,
    Biometric,
    Qr,
}

/// One check-in; at most one per member per calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub organization_id: String,
    pub member_id: String,
    pub member_name: Option<String>,
    pub date: NaiveDate,
    /// Unix millis
    pub check_in_time: i64,
    pub check_out_time: Option<i64>,
    pub method: CheckInMethod,
    /// e.g. "fingerprint" when the biometric device confirmed the member
    pub verification_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    #[validate(length(min = 1))]
    pub member_id: String,
    #[serde(default)]
    pub method: CheckInMethod,
    #[validate(length(max = 50))]
    pub verification_method: Option<String>,
}
