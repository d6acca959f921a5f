//! Member Repository

use chrono::NaiveDate;
use shared::models::{Member, SubscriptionStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::scope::{PageRequest, Paginated, ScopedQuery};

const TABLE: &str = "member";

/// Fields matched by the free-text member search
pub const SEARCH_FIELDS: &[&str] = &["name", "email", "phone", "membershipNumber"];

/// Default member page size
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filters accepted by the member list
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub status: Option<SubscriptionStatus>,
}

#[derive(Clone)]
pub struct MemberRepository {
    base: BaseRepository,
}

impl MemberRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, member: &Member) -> RepoResult<()> {
        self.base.insert(TABLE, &member.id, member).await
    }

    pub async fn find_by_id(&self, organization_id: &str, id: &str) -> RepoResult<Option<Member>> {
        self.base.find_scoped(TABLE, organization_id, id).await
    }

    /// Write back an edited member; false when it is not in the organization
    pub async fn save(&self, member: &Member) -> RepoResult<bool> {
        self.base
            .replace_scoped(TABLE, &member.organization_id, &member.id, member)
            .await
    }

    pub async fn delete(&self, organization_id: &str, id: &str) -> RepoResult<bool> {
        self.base.delete_scoped(TABLE, organization_id, id).await
    }

    /// Newest members first
    pub async fn list(
        &self,
        organization_id: &str,
        filter: &MemberFilter,
        page: PageRequest,
    ) -> RepoResult<Paginated<Member>> {
        ScopedQuery::new(TABLE, organization_id)
            .search(SEARCH_FIELDS, filter.search.as_deref())
            .eq("subscription.status", filter.status.map(|s| s.as_str()))
            .order_by("createdAt", true)
            .fetch_page(self.base.db(), page)
            .await
    }

    pub async fn recent(&self, organization_id: &str, limit: u32) -> RepoResult<Vec<Member>> {
        ScopedQuery::new(TABLE, organization_id)
            .order_by("createdAt", true)
            .limit(limit)
            .fetch(self.base.db())
            .await
    }

    pub async fn count(
        &self,
        organization_id: &str,
        status: Option<SubscriptionStatus>,
    ) -> RepoResult<u64> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("subscription.status", status.map(|s| s.as_str()))
            .count(self.base.db())
            .await
    }

    /// Members whose `endDate` falls inside `[from, to]`
    pub async fn count_ending_between(
        &self,
        organization_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<u64> {
        ScopedQuery::new(TABLE, organization_id)
            .range(
                "subscription.endDate",
                Some(from.to_string()),
                Some(to.to_string()),
            )
            .count(self.base.db())
            .await
    }

    /// Members whose `endDate` lies before `today`, whatever their stored status
    pub async fn count_lapsed(&self, organization_id: &str, today: NaiveDate) -> RepoResult<u64> {
        ScopedQuery::new(TABLE, organization_id)
            .before("subscription.endDate", today.to_string())
            .count(self.base.db())
            .await
    }

    /// Flip active members whose `endDate` lies before `today` to suspended
    ///
    /// Returns the number of members changed.
    pub async fn suspend_lapsed(
        &self,
        organization_id: &str,
        today: NaiveDate,
        now: i64,
    ) -> RepoResult<u64> {
        let lapsed = ScopedQuery::new(TABLE, organization_id)
            .eq("subscription.status", Some(SubscriptionStatus::Active.as_str()))
            .before("subscription.endDate", today.to_string())
            .count(self.base.db())
            .await?;
        if lapsed == 0 {
            return Ok(0);
        }

        self.base
            .db()
            .query(
                "UPDATE member SET subscription.status = $suspended, updatedAt = $now \
                 WHERE organizationId = $organization_id \
                 AND subscription.status = $active \
                 AND subscription.endDate < $today RETURN NONE",
            )
            .bind(("suspended", SubscriptionStatus::Suspended.as_str()))
            .bind(("active", SubscriptionStatus::Active.as_str()))
            .bind(("now", now))
            .bind(("organization_id", organization_id.to_string()))
            .bind(("today", today.to_string()))
            .await?
            .check()?;
        Ok(lapsed)
    }
}
