//! Gym Server - multi-tenant gym management backend
//!
//! # Module layout
//!
//! ```text
//! gym-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT cookie guard, password hashing
//! ├── db/            # embedded SurrealDB, tenant-scoped queries, repositories
//! ├── membership/    # subscription lifecycle rules
//! ├── services/      # member onboarding, payment recorder, biometric device
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation, dates
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod membership;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
