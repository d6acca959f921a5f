//! Unified error system for the gym platform
//!
//! - [`ErrorCode`]: numeric codes grouped by domain range
//! - [`ErrorCategory`]: the domain a code belongs to
//! - [`AppError`]: code + message + optional details
//! - [`ApiResponse`]: the `{ success, message, ... }` JSON envelope
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "phone is required")
//!     .with_detail("field", "phone");
//! let body = ApiResponse::<()>::error(&err);
//! assert!(!body.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
