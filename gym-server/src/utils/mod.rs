//! Utilities: error re-exports, logging, validation, dates

pub mod json;
pub mod logger;
pub mod time;
pub mod validation;

pub use json::AppJson;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
