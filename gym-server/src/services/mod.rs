//! Service layer
//!
//! - [`MemberService`] - member onboarding, edits, listing
//! - [`PaymentRecorder`] - payments and the renewals they trigger
//! - [`AttendanceService`] - daily check-in / check-out
//! - [`BiometricService`] - enrollment and verification via [`BiometricDevice`]
//! - [`DashboardService`] - aggregate counts and activity feed

pub mod attendance;
pub mod biometric;
pub mod dashboard;
pub mod members;
pub mod payments;

pub use attendance::AttendanceService;
pub use biometric::{BiometricDevice, BiometricService, MockBiometricDevice};
pub use dashboard::DashboardService;
pub use members::MemberService;
pub use payments::PaymentRecorder;
