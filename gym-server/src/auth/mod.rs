//! Authentication
//!
//! - [`JwtService`] - token signing and verification
//! - [`CurrentUser`] - verified caller context (user + organization)
//! - [`require_auth`] - tenant guard middleware
//! - [`require_owner`], [`require_staff`] - role gates for route groups
//! - [`cookie`] - auth cookie parsing and `Set-Cookie` values
//! - [`password`] - argon2 hashing

pub mod cookie;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_owner, require_staff};
