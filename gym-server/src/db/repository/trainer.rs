//! Trainer Repository

use shared::models::Trainer;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::scope::ScopedQuery;

const TABLE: &str = "trainer";

const LIST_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct TrainerRepository {
    base: BaseRepository,
}

impl TrainerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, trainer: &Trainer) -> RepoResult<()> {
        self.base.insert(TABLE, &trainer.id, trainer).await
    }

    pub async fn find_by_id(&self, organization_id: &str, id: &str) -> RepoResult<Option<Trainer>> {
        self.base.find_scoped(TABLE, organization_id, id).await
    }

    /// Trainers by name, optionally narrowed by a free-text term
    pub async fn list(&self, organization_id: &str, search: Option<&str>) -> RepoResult<Vec<Trainer>> {
        ScopedQuery::new(TABLE, organization_id)
            .search(&["name", "email", "phone", "specialization"], search)
            .order_by("name", false)
            .limit(LIST_LIMIT)
            .fetch(self.base.db())
            .await
    }

    pub async fn save(&self, trainer: &Trainer) -> RepoResult<bool> {
        self.base
            .replace_scoped(TABLE, &trainer.organization_id, &trainer.id, trainer)
            .await
    }

    pub async fn delete(&self, organization_id: &str, id: &str) -> RepoResult<bool> {
        self.base.delete_scoped(TABLE, organization_id, id).await
    }
}
