//! Organization Repository

use shared::models::Organization;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, content_without_id};

const TABLE: &str = "organization";

#[derive(Clone)]
pub struct OrganizationRepository {
    base: BaseRepository,
}

impl OrganizationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, org: &Organization) -> RepoResult<()> {
        self.base.insert(TABLE, &org.id, org).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Organization>> {
        let mut res = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($table, $id)")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await?;
        Ok(res.take(0)?)
    }

    /// Replace the mutable profile fields and settings
    pub async fn save(&self, org: &Organization) -> RepoResult<()> {
        let content = content_without_id(org)?;
        self.base
            .db()
            .query("UPDATE type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", org.id.clone()))
            .bind(("content", content))
            .await?
            .check()?;
        Ok(())
    }
}
