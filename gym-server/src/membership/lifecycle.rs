//! Subscription lifecycle rules
//!
//! Pure functions over [`Subscription`]; persistence lives in
//! [`super::MembershipService`] and the payment recorder.
//!
//! ```text
//! active ──(endDate passes)──▶ lapsed (derived, not stored)
//!    ▲                              │ suspend-expired (opt-in per gym)
//!    │                              ▼
//!    └──────(renewal payment)──── suspended
//! ```

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use shared::models::{DurationType, Member, MemberView, Plan, Subscription, SubscriptionStatus};

use crate::utils::{AppError, AppResult, ErrorCode};

/// A renewal payment always buys one calendar month, whatever the plan's
/// own duration.
pub const RENEWAL_PERIOD: Months = Months::new(1);

/// Length of a subscription term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Days(u32),
    Months(u32),
    Years(u32),
}

impl Term {
    pub fn from_plan(plan: &Plan) -> Self {
        match plan.duration_type {
            DurationType::Days => Term::Days(plan.duration),
            DurationType::Months => Term::Months(plan.duration),
            DurationType::Years => Term::Years(plan.duration),
        }
    }

    /// Calendar arithmetic; month ends clamp (Jan 31 + 1 month = Feb 28/29)
    pub fn end_from(&self, start: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Term::Days(n) => start.checked_add_days(Days::new(u64::from(n))),
            Term::Months(n) => start.checked_add_months(Months::new(n)),
            Term::Years(n) => n
                .checked_mul(12)
                .and_then(|months| start.checked_add_months(Months::new(months))),
        }
    }
}

/// What a new subscription is bought with
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTerms {
    pub plan_id: Option<String>,
    pub plan_name: String,
    pub amount: Decimal,
    pub term: Term,
}

/// New active subscription starting on `start`
pub fn start_subscription(
    terms: PlanTerms,
    start: NaiveDate,
    auto_renewal: bool,
) -> AppResult<Subscription> {
    let end_date = terms
        .term
        .end_from(start)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidSubscriptionDates))?;
    ensure_dates_ordered(start, end_date)?;

    Ok(Subscription {
        plan_id: terms.plan_id,
        plan_name: terms.plan_name,
        start_date: start,
        end_date,
        amount: terms.amount,
        status: SubscriptionStatus::Active,
        auto_renewal,
    })
}

/// Extend by [`RENEWAL_PERIOD`] from the current end date and reactivate
///
/// The extension counts from `endDate` even when it already lies in the
/// past; the lapsed days are not refunded.
pub fn renew(subscription: &Subscription) -> AppResult<Subscription> {
    let end_date = subscription
        .end_date
        .checked_add_months(RENEWAL_PERIOD)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidSubscriptionDates))?;

    Ok(Subscription {
        end_date,
        status: SubscriptionStatus::Active,
        ..subscription.clone()
    })
}

/// Whole days from `today` to `end_date`; negative once lapsed
pub fn days_until_expiry(end_date: NaiveDate, today: NaiveDate) -> i64 {
    (end_date - today).num_days()
}

pub fn is_lapsed(subscription: &Subscription, today: NaiveDate) -> bool {
    days_until_expiry(subscription.end_date, today) < 0
}

/// Check-in gate; looks at the stored status only
pub fn ensure_can_check_in(subscription: &Subscription) -> AppResult<()> {
    if subscription.status != SubscriptionStatus::Active {
        return Err(AppError::subscription_not_active());
    }
    Ok(())
}

pub fn ensure_dates_ordered(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end <= start {
        return Err(AppError::new(ErrorCode::InvalidSubscriptionDates)
            .with_detail("startDate", start.to_string())
            .with_detail("endDate", end.to_string()));
    }
    Ok(())
}

/// API view with the derived `daysUntilExpiry`; stored status untouched
pub fn view(member: Member, today: NaiveDate) -> MemberView {
    let days_until_expiry = days_until_expiry(member.subscription.end_date, today);
    MemberView {
        member,
        days_until_expiry,
    }
}
