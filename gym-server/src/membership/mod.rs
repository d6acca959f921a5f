//! Membership lifecycle
//!
//! [`lifecycle`] holds the date arithmetic and status rules;
//! [`MembershipService`] applies the organization-level policies that need
//! storage.

pub mod lifecycle;
mod service;

pub use lifecycle::{
    PlanTerms, RENEWAL_PERIOD, Term, days_until_expiry, ensure_can_check_in, renew,
    start_subscription, view,
};
pub use service::{MembershipService, SuspendOutcome};
