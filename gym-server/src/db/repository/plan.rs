//! Plan Repository

use shared::models::Plan;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::scope::ScopedQuery;

const TABLE: &str = "plan";

/// Plans per organization are few; one bounded read returns all of them
const LIST_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct PlanRepository {
    base: BaseRepository,
}

impl PlanRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, plan: &Plan) -> RepoResult<()> {
        self.base.insert(TABLE, &plan.id, plan).await
    }

    pub async fn find_by_id(&self, organization_id: &str, id: &str) -> RepoResult<Option<Plan>> {
        self.base.find_scoped(TABLE, organization_id, id).await
    }

    /// Plans ordered by price; `active_only` hides retired plans
    pub async fn list(&self, organization_id: &str, active_only: bool) -> RepoResult<Vec<Plan>> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("isActive", active_only.then_some(true))
            .order_by("amount", false)
            .limit(LIST_LIMIT)
            .fetch(self.base.db())
            .await
    }

    pub async fn save(&self, plan: &Plan) -> RepoResult<bool> {
        self.base
            .replace_scoped(TABLE, &plan.organization_id, &plan.id, plan)
            .await
    }

    pub async fn delete(&self, organization_id: &str, id: &str) -> RepoResult<bool> {
        self.base.delete_scoped(TABLE, organization_id, id).await
    }
}
