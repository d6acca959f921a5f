//! WhatsApp template API
//!
//! Read-only catalogue of message templates. Sending is not performed by
//! this server.

mod templates;

use axum::{
    Router,
    extract::Query,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

pub use templates::{TEMPLATES, Template};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/whatsapp/templates", get(list))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateList {
    templates: Vec<&'static Template>,
}

/// Templates matching both filters; `all` or empty disables a filter
pub fn filter_templates(category: Option<&str>, status: Option<&str>) -> Vec<&'static Template> {
    let wanted = |value: Option<&str>, actual: &str| match value.map(str::trim) {
        None | Some("") | Some("all") => true,
        Some(v) => v.eq_ignore_ascii_case(actual),
    };
    TEMPLATES
        .iter()
        .filter(|t| wanted(category, t.category) && wanted(status, t.status))
        .collect()
}

/// GET /api/whatsapp/templates - filter by `category` and `status`
async fn list(Query(query): Query<ListQuery>) -> AppResult<ApiResponse<TemplateList>> {
    let templates = filter_templates(query.category.as_deref(), query.status.as_deref());
    Ok(ApiResponse::success(TemplateList { templates }))
}
