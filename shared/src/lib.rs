//! Shared types for the gym platform
//!
//! Domain models, the unified error system and the JSON response envelope
//! used by `gym-server` and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
