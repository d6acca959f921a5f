//! Lead Repository

use shared::models::{Lead, LeadStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::scope::{PageRequest, Paginated, ScopedQuery};

const TABLE: &str = "lead";

/// Default lead page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
}

#[derive(Clone)]
pub struct LeadRepository {
    base: BaseRepository,
}

impl LeadRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, lead: &Lead) -> RepoResult<()> {
        self.base.insert(TABLE, &lead.id, lead).await
    }

    pub async fn find_by_id(&self, organization_id: &str, id: &str) -> RepoResult<Option<Lead>> {
        self.base.find_scoped(TABLE, organization_id, id).await
    }

    /// Newest leads first
    pub async fn list(
        &self,
        organization_id: &str,
        filter: &LeadFilter,
        page: PageRequest,
    ) -> RepoResult<Paginated<Lead>> {
        ScopedQuery::new(TABLE, organization_id)
            .search(&["name", "phone", "email"], filter.search.as_deref())
            .eq("status", filter.status.map(|s| s.as_str()))
            .order_by("createdAt", true)
            .fetch_page(self.base.db(), page)
            .await
    }

    pub async fn count(&self, organization_id: &str, status: Option<LeadStatus>) -> RepoResult<u64> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("status", status.map(|s| s.as_str()))
            .count(self.base.db())
            .await
    }

    pub async fn save(&self, lead: &Lead) -> RepoResult<bool> {
        self.base
            .replace_scoped(TABLE, &lead.organization_id, &lead.id, lead)
            .await
    }

    pub async fn delete(&self, organization_id: &str, id: &str) -> RepoResult<bool> {
        self.base.delete_scoped(TABLE, organization_id, id).await
    }
}
