//! Member Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored subscription status
///
/// Reads never rewrite it; see `daysUntilExpiry` on [`MemberView`] for the
/// derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Suspended,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
        }
    }
}

/// A member's gym subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan_id: Option<String>,
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub auto_renewal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 20))]
    pub phone: String,
    pub relation: Option<String>,
}

/// Stored member document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub organization_id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub membership_number: String,
    pub subscription: Subscription,
    pub join_date: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Member as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    /// Days from today to `subscription.endDate`; negative once lapsed
    pub days_until_expiry: i64,
}

/// Create member payload
///
/// `planDuration` is a number of days. When it is absent and `planId` names
/// a plan of the organization, the plan's duration applies.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,
    pub plan_id: Option<String>,
    #[validate(length(max = 100))]
    pub plan_name: Option<String>,
    #[validate(range(min = 1, max = 3660))]
    pub plan_duration: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub auto_renewal: Option<bool>,
}

/// Update member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContact>,
    pub subscription: Option<SubscriptionUpdate>,
}

/// Manual subscription edit (the explicit way to reconcile drifted status)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    pub plan_id: Option<String>,
    pub plan_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub status: Option<SubscriptionStatus>,
    pub auto_renewal: Option<bool>,
}
