//! Data models
//!
//! Stored documents and request payloads shared between `gym-server` and its
//! clients. Field names are camelCase on the wire and in the database; every
//! document id is a UUID string.

pub mod attendance;
pub mod biometric;
pub mod lead;
pub mod member;
pub mod organization;
pub mod payment;
pub mod plan;
pub mod trainer;
pub mod user;

// Re-exports
pub use attendance::*;
pub use biometric::*;
pub use lead::*;
pub use member::*;
pub use organization::*;
pub use payment::*;
pub use plan::*;
pub use trainer::*;
pub use user::*;
