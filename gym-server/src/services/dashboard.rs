//! Dashboard aggregates

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{LeadStatus, SubscriptionStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{
    AttendanceRepository, LeadRepository, MemberRepository, PaymentRepository,
};
use crate::utils::AppResult;

/// Members ending within this many days count as expiring soon
pub const EXPIRING_WINDOW_DAYS: u64 = 7;

/// Entries per source in the activity feed
const FEED_PER_SOURCE: u32 = 5;

/// Length of the merged activity feed
const FEED_LEN: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: u64,
    pub active_members: u64,
    /// `endDate` within the next [`EXPIRING_WINDOW_DAYS`] days
    pub expiring_soon: u64,
    /// `endDate` already passed, whatever the stored status
    pub expired_members: u64,
    pub today_attendance: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_revenue: Decimal,
    pub total_leads: u64,
    pub new_leads: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Member,
    Payment,
    Attendance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_activity: Vec<Activity>,
}

#[derive(Clone)]
pub struct DashboardService {
    members: MemberRepository,
    payments: PaymentRepository,
    attendance: AttendanceRepository,
    leads: LeadRepository,
}

impl DashboardService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            members: MemberRepository::new(db.clone()),
            payments: PaymentRepository::new(db.clone()),
            attendance: AttendanceRepository::new(db.clone()),
            leads: LeadRepository::new(db),
        }
    }

    pub async fn load(&self, org: &str, today: NaiveDate) -> AppResult<Dashboard> {
        let window_end = today
            .checked_add_days(Days::new(EXPIRING_WINDOW_DAYS))
            .unwrap_or(today);
        let revenue = self.payments.revenue(org, today).await?;

        let stats = DashboardStats {
            total_members: self.members.count(org, None).await?,
            active_members: self
                .members
                .count(org, Some(SubscriptionStatus::Active))
                .await?,
            expiring_soon: self.members.count_ending_between(org, today, window_end).await?,
            expired_members: self.members.count_lapsed(org, today).await?,
            today_attendance: self.attendance.count_by_date(org, today).await?,
            total_revenue: revenue.total_revenue,
            monthly_revenue: revenue.monthly_revenue,
            total_leads: self.leads.count(org, None).await?,
            new_leads: self.leads.count(org, Some(LeadStatus::New)).await?,
        };

        let mut feed = Vec::new();
        for member in self.members.recent(org, FEED_PER_SOURCE).await? {
            feed.push(Activity {
                kind: ActivityKind::Member,
                description: format!("{} joined ({})", member.name, member.subscription.plan_name),
                timestamp: member.created_at,
            });
        }
        for payment in self.payments.list_recent(org, FEED_PER_SOURCE).await? {
            feed.push(Activity {
                kind: ActivityKind::Payment,
                description: format!(
                    "Payment of {} from {}",
                    payment.amount,
                    payment.member_name.as_deref().unwrap_or("member")
                ),
                timestamp: payment.payment_date,
            });
        }
        let check_ins = self.attendance.list_by_date(org, today, None).await?;
        for attendance in check_ins.into_iter().take(FEED_PER_SOURCE as usize) {
            feed.push(Activity {
                kind: ActivityKind::Attendance,
                description: format!(
                    "{} checked in",
                    attendance.member_name.as_deref().unwrap_or("Member")
                ),
                timestamp: attendance.check_in_time,
            });
        }

        Ok(Dashboard {
            stats,
            recent_activity: merge_feed(feed),
        })
    }
}

/// Newest first, truncated to [`FEED_LEN`]
fn merge_feed(mut feed: Vec<Activity>) -> Vec<Activity> {
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed.truncate(FEED_LEN);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(kind: ActivityKind, timestamp: i64) -> Activity {
        Activity {
            kind,
            description: String::new(),
            timestamp,
        }
    }

    #[test]
    fn test_feed_is_newest_first_and_bounded() {
        let feed: Vec<Activity> = (0..15)
            .map(|i| activity(ActivityKind::Payment, i))
            .chain([activity(ActivityKind::Member, 100)])
            .collect();
        let merged = merge_feed(feed);
        assert_eq!(merged.len(), FEED_LEN);
        assert_eq!(merged[0].kind, ActivityKind::Member);
        assert!(merged.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_activity_kind_wire_name() {
        let json = serde_json::to_value(activity(ActivityKind::Attendance, 1)).unwrap();
        assert_eq!(json["type"], "attendance");
    }
}
