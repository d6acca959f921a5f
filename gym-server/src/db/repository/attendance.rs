//! Attendance Repository
//!
//! A check-in is keyed by (organization, member, date), so a second
//! check-in for the same day collides on the record key and fails with
//! [`RepoError::Duplicate`](super::RepoError::Duplicate) inside the store.

use chrono::NaiveDate;
use shared::models::Attendance;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoResult};
use crate::db::scope::ScopedQuery;

const TABLE: &str = "attendance";

/// Upper bound on one day's attendance list
const DAY_LIMIT: u32 = 100;

/// Record key of a member's check-in on `date`
pub fn daily_key(organization_id: &str, member_id: &str, date: NaiveDate) -> String {
    let name = format!("{organization_id}:{member_id}:{date}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a check-in; `attendance.id` must come from [`daily_key`]
    pub async fn create(&self, attendance: &Attendance) -> RepoResult<()> {
        self.base.insert(TABLE, &attendance.id, attendance).await
    }

    pub async fn find_by_id(
        &self,
        organization_id: &str,
        id: &str,
    ) -> RepoResult<Option<Attendance>> {
        self.base.find_scoped(TABLE, organization_id, id).await
    }

    /// Latest check-ins first
    pub async fn list_by_date(
        &self,
        organization_id: &str,
        date: NaiveDate,
        member_id: Option<&str>,
    ) -> RepoResult<Vec<Attendance>> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("date", Some(date.to_string()))
            .eq("memberId", member_id)
            .order_by("checkInTime", true)
            .limit(DAY_LIMIT)
            .fetch(self.base.db())
            .await
    }

    pub async fn count_by_date(&self, organization_id: &str, date: NaiveDate) -> RepoResult<u64> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("date", Some(date.to_string()))
            .count(self.base.db())
            .await
    }

    pub async fn save(&self, attendance: &Attendance) -> RepoResult<bool> {
        self.base
            .replace_scoped(TABLE, &attendance.organization_id, &attendance.id, attendance)
            .await
    }
}
