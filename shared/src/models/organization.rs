//! Organization Model
//!
//! The tenant root. Every other document carries its `organizationId`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gym owner organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub settings: OrganizationSettings,
    pub subscription: PlatformSubscription,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Per-gym preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Allows `POST /api/members/suspend-expired` to suspend lapsed members
    #[serde(default)]
    pub auto_suspend_expired: bool,
    #[serde(default)]
    pub whatsapp_enabled: bool,
    /// Days before expiry at which reminders are due
    #[serde(default = "default_reminder_days")]
    pub reminder_days: Vec<u32>,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            auto_suspend_expired: false,
            whatsapp_enabled: false,
            reminder_days: default_reminder_days(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_reminder_days() -> Vec<u32> {
    vec![7, 3, 1]
}

/// The gym's own subscription to the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSubscription {
    pub plan: String,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl PlatformSubscription {
    /// Every new organization starts on a 14-day trial
    pub fn trial(start: NaiveDate) -> Self {
        Self {
            plan: "trial".to_string(),
            status: "active".to_string(),
            start_date: start,
            end_date: start.checked_add_days(chrono::Days::new(14)),
        }
    }
}

/// Update organization payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub settings: Option<OrganizationSettingsUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettingsUpdate {
    pub currency: Option<String>,
    pub auto_suspend_expired: Option<bool>,
    pub whatsapp_enabled: Option<bool>,
    pub reminder_days: Option<Vec<u32>>,
}

impl OrganizationSettings {
    /// Apply a partial update, keeping fields the caller did not send
    pub fn apply(&mut self, update: OrganizationSettingsUpdate) {
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(flag) = update.auto_suspend_expired {
            self.auto_suspend_expired = flag;
        }
        if let Some(flag) = update.whatsapp_enabled {
            self.whatsapp_enabled = flag;
        }
        if let Some(days) = update.reminder_days {
            self.reminder_days = days;
        }
    }
}
