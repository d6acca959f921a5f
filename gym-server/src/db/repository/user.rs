//! User Repository

use shared::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a user; email collisions surface as [`RepoError::Duplicate`]
    pub async fn create(&self, user: &User) -> RepoResult<()> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already registered",
                user.email
            )));
        }
        self.base.insert(TABLE, &user.id, user).await
    }

    /// Lookup by (already normalized) email, across organizations
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut res = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        Ok(res.take(0)?)
    }

    /// Remove a login whose owning document could not be written
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE type::thing($table, $id)")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let mut res = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($table, $id)")
            .bind(("table", TABLE))
            .bind(("id", id.to_string()))
            .await?;
        Ok(res.take(0)?)
    }
}
