//! Repository Module
//!
//! Document access per table. Keys are UUID strings addressed with
//! `type::thing($table, $id)`; reads project `record::id(id) AS id` so
//! models carry the bare key. Every lookup of tenant data also checks
//! `organizationId`, so a foreign id behaves exactly like a missing one.

pub mod attendance;
pub mod biometric;
pub mod lead;
pub mod member;
pub mod organization;
pub mod payment;
pub mod plan;
pub mod trainer;
pub mod user;

pub use attendance::AttendanceRepository;
pub use biometric::BiometricRepository;
pub use lead::LeadRepository;
pub use member::MemberRepository;
pub use organization::OrganizationRepository;
pub use payment::PaymentRepository;
pub use plan::PlanRepository;
pub use trainer::TrainerRepository;
pub use user::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Thrown by a renewal whose member changed since it was read; must match
/// the `THROW` in [`PaymentRepository::record`]
pub const STALE_SUBSCRIPTION: &str = "stale subscription";

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Write lost a race; the caller may re-read and retry
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Lower is more specific
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            RepoError::Conflict(_) => 0,
            RepoError::Duplicate(_) => 1,
            RepoError::Database(_) => 2,
        }
    }
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains(STALE_SUBSCRIPTION)
            || message.contains("read or write conflict")
            || message.contains("can be retried")
        {
            RepoError::Conflict(message)
        // Unique index violation, or CREATE on an existing record key
        } else if message.contains("already contains") || message.contains("already exists") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("Serialization failed: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(what) => AppError::with_message(ErrorCode::AlreadyExists, what),
            RepoError::Conflict(_) => AppError::new(ErrorCode::ConcurrentModification),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Document body for `CONTENT`: the model minus its `id`
pub fn content_without_id<T: Serialize>(doc: &T) -> RepoResult<Value> {
    let mut value = serde_json::to_value(doc)?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(value)
}

/// Base repository with database reference and tenant-checked CRUD helpers
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Create `table:id` with the document's fields
    pub async fn insert<T: Serialize>(&self, table: &'static str, id: &str, doc: &T) -> RepoResult<()> {
        let content = content_without_id(doc)?;
        self.db
            .query("CREATE type::thing($table, $id) CONTENT $content")
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .bind(("content", content))
            .await?
            .check()?;
        Ok(())
    }

    /// Fetch `table:id` only if it belongs to `organization_id`
    pub async fn find_scoped<T: DeserializeOwned>(
        &self,
        table: &'static str,
        organization_id: &str,
        id: &str,
    ) -> RepoResult<Option<T>> {
        let mut res = self
            .db
            .query(
                "SELECT *, record::id(id) AS id FROM type::thing($table, $id) \
                 WHERE organizationId = $organization_id",
            )
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .bind(("organization_id", organization_id.to_string()))
            .await?;
        Ok(res.take(0)?)
    }

    /// Replace the whole body of `table:id` of `organization_id`; false when absent
    pub async fn replace_scoped<T: Serialize>(
        &self,
        table: &'static str,
        organization_id: &str,
        id: &str,
        doc: &T,
    ) -> RepoResult<bool> {
        if !self.exists_scoped(table, organization_id, id).await? {
            return Ok(false);
        }
        let content = content_without_id(doc)?;
        self.db
            .query(
                "UPDATE type::thing($table, $id) CONTENT $content \
                 WHERE organizationId = $organization_id RETURN NONE",
            )
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .bind(("content", content))
            .bind(("organization_id", organization_id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    /// Delete `table:id` of `organization_id`; false when absent
    pub async fn delete_scoped(
        &self,
        table: &'static str,
        organization_id: &str,
        id: &str,
    ) -> RepoResult<bool> {
        if !self.exists_scoped(table, organization_id, id).await? {
            return Ok(false);
        }
        self.db
            .query("DELETE type::thing($table, $id) WHERE organizationId = $organization_id")
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .bind(("organization_id", organization_id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    async fn exists_scoped(
        &self,
        table: &'static str,
        organization_id: &str,
        id: &str,
    ) -> RepoResult<bool> {
        let found: Option<Value> = self.find_scoped(table, organization_id, id).await?;
        Ok(found.is_some())
    }
}
