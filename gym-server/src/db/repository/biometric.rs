//! Biometric Repository
//!
//! One record per (organization, user, biometricType, fingerIndex); the
//! record key is derived from that tuple so re-enrolling overwrites it.

use shared::models::{Biometric, BiometricType};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoResult, content_without_id};
use crate::db::scope::ScopedQuery;

const TABLE: &str = "biometric";

const LIST_LIMIT: u32 = 100;

pub fn enrollment_key(
    organization_id: &str,
    user_id: &str,
    biometric_type: BiometricType,
    finger_index: u8,
) -> String {
    let name = format!(
        "{organization_id}:{user_id}:{}:{finger_index}",
        biometric_type.as_str()
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

#[derive(Clone)]
pub struct BiometricRepository {
    base: BaseRepository,
}

impl BiometricRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create or overwrite the enrollment; `biometric.id` must come from
    /// [`enrollment_key`]
    pub async fn upsert(&self, biometric: &Biometric) -> RepoResult<()> {
        let content = content_without_id(biometric)?;
        self.base
            .db()
            .query("UPSERT type::thing($table, $id) CONTENT $content RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", biometric.id.clone()))
            .bind(("content", content))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn list(
        &self,
        organization_id: &str,
        user_id: Option<&str>,
    ) -> RepoResult<Vec<Biometric>> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("userId", user_id)
            .order_by("enrollmentDate", true)
            .limit(LIST_LIMIT)
            .fetch(self.base.db())
            .await
    }

    /// Active enrollments of one user for one modality
    pub async fn find_active_for_user(
        &self,
        organization_id: &str,
        user_id: &str,
        biometric_type: BiometricType,
    ) -> RepoResult<Vec<Biometric>> {
        ScopedQuery::new(TABLE, organization_id)
            .eq("userId", Some(user_id))
            .eq("biometricType", Some(biometric_type.as_str()))
            .eq("isActive", Some(true))
            .limit(LIST_LIMIT)
            .fetch(self.base.db())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_key_per_finger() {
        let a = enrollment_key("o1", "u1", BiometricType::Fingerprint, 0);
        assert_eq!(a, enrollment_key("o1", "u1", BiometricType::Fingerprint, 0));
        assert_ne!(a, enrollment_key("o1", "u1", BiometricType::Fingerprint, 1));
        assert_ne!(a, enrollment_key("o1", "u1", BiometricType::Face, 0));
    }
}
