//! Trainer Model

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: String,
    pub organization_id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub specialization: Option<String>,
    pub experience_years: Option<u32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainerCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone: String,
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
    #[validate(range(max = 80))]
    pub experience_years: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainerUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
    #[validate(range(max = 80))]
    pub experience_years: Option<u32>,
    pub is_active: Option<bool>,
}
