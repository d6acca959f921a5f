//! Payment Repository
//!
//! Payments are immutable once written. A payment that renews a
//! subscription is stored together with the member update in one
//! transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{Payment, RevenueStats, SubscriptionStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, content_without_id};
use crate::db::scope::ScopedQuery;
use crate::utils::time::{day_end_millis, day_start_millis, month_start};

const TABLE: &str = "payment";

/// How many payments the list endpoint returns
pub const RECENT_LIMIT: u32 = 100;

/// Member subscription change written alongside a payment
///
/// Applied only while the stored `endDate` still equals
/// `previous_end_date`; otherwise the whole transaction is cancelled with
/// [`RepoError::Conflict`].
#[derive(Debug, Clone, PartialEq)]
pub struct Renewal {
    pub member_id: String,
    pub previous_end_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AmountRow {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    payment_date: i64,
}

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Store `payment`, and apply `renewal` to the member in the same
    /// transaction when present
    pub async fn record(&self, payment: &Payment, renewal: Option<&Renewal>) -> RepoResult<()> {
        let Some(renewal) = renewal else {
            return self.base.insert(TABLE, &payment.id, payment).await;
        };

        let content = content_without_id(payment)?;
        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $renewed = (UPDATE type::thing('member', $member_id) \
                 SET subscription.endDate = $end_date, subscription.status = $active, \
                 updatedAt = $now \
                 WHERE organizationId = $organization_id \
                 AND subscription.endDate = $previous_end_date \
                 RETURN AFTER); \
                 IF array::len($renewed) = 0 { THROW 'stale subscription' }; \
                 CREATE type::thing('payment', $payment_id) CONTENT $content; \
                 COMMIT TRANSACTION;",
            )
            .bind(("payment_id", payment.id.clone()))
            .bind(("content", content))
            .bind(("member_id", renewal.member_id.clone()))
            .bind(("previous_end_date", renewal.previous_end_date.to_string()))
            .bind(("end_date", renewal.end_date.to_string()))
            .bind(("active", SubscriptionStatus::Active.as_str()))
            .bind(("now", payment.payment_date))
            .bind(("organization_id", payment.organization_id.clone()))
            .await?;

        // A cancelled transaction reports an error for every statement;
        // the most specific one decides
        let errors: Vec<RepoError> = response
            .take_errors()
            .into_values()
            .map(RepoError::from)
            .collect();
        match errors.into_iter().min_by_key(RepoError::precedence) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Most recent payments first, at most [`RECENT_LIMIT`]
    pub async fn list_recent(&self, organization_id: &str, limit: u32) -> RepoResult<Vec<Payment>> {
        ScopedQuery::new(TABLE, organization_id)
            .order_by("paymentDate", true)
            .limit(limit.min(RECENT_LIMIT))
            .fetch(self.base.db())
            .await
    }

    /// Revenue totals over every payment of the organization, summed as
    /// decimals
    pub async fn revenue(&self, organization_id: &str, today: NaiveDate) -> RepoResult<RevenueStats> {
        let rows: Vec<AmountRow> = ScopedQuery::new(TABLE, organization_id)
            .select("amount, paymentDate")
            .fetch(self.base.db())
            .await?;
        Ok(summarize(&rows, today))
    }
}

fn summarize(rows: &[AmountRow], today: NaiveDate) -> RevenueStats {
    let month_from = day_start_millis(month_start(today));
    let today_from = day_start_millis(today);
    let today_to = day_end_millis(today);

    let mut stats = RevenueStats::default();
    for row in rows {
        stats.total_revenue += row.amount;
        stats.total_payments += 1;
        if row.payment_date >= month_from {
            stats.monthly_revenue += row.amount;
        }
        if (today_from..today_to).contains(&row.payment_date) {
            stats.today_revenue += row.amount;
        }
    }
    stats
}
