use chrono::NaiveDate;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{MemberRepository, OrganizationRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Result of an auto-suspend run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendOutcome {
    /// `autoSuspendExpired` setting at the time of the run
    pub enabled: bool,
    pub suspended: u64,
}

#[derive(Clone)]
pub struct MembershipService {
    members: MemberRepository,
    organizations: OrganizationRepository,
}

impl MembershipService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            members: MemberRepository::new(db.clone()),
            organizations: OrganizationRepository::new(db),
        }
    }

    /// Suspend members whose subscription ended before `today`
    ///
    /// Does nothing unless the organization enabled `autoSuspendExpired`.
    pub async fn suspend_expired(
        &self,
        organization_id: &str,
        today: NaiveDate,
        now: i64,
    ) -> AppResult<SuspendOutcome> {
        let organization = self
            .organizations
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrganizationNotFound))?;

        if !organization.settings.auto_suspend_expired {
            return Ok(SuspendOutcome {
                enabled: false,
                suspended: 0,
            });
        }

        let suspended = self
            .members
            .suspend_lapsed(organization_id, today, now)
            .await?;
        tracing::info!(
            organization_id = %organization_id,
            %today,
            suspended,
            "Suspended lapsed memberships"
        );
        Ok(SuspendOutcome {
            enabled: true,
            suspended,
        })
    }
}
