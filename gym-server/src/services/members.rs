//! Member onboarding and maintenance
//!
//! Creating a member also links it to a login: an existing user with the
//! same email in the organization is reused, otherwise a `member` user is
//! created with a one-time password.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{
    Member, MemberCreate, MemberUpdate, MemberView, Subscription, SubscriptionUpdate, User,
    UserRole,
};
use shared::util::{membership_number, new_id, now_millis, temporary_password};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::auth::password::hash_password;
use crate::db::repository::member::MemberFilter;
use crate::db::repository::{MemberRepository, PlanRepository, RepoError, UserRepository};
use crate::db::scope::{PageRequest, Paginated};
use crate::membership::{self, PlanTerms, Term};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, normalize_email, validate_non_negative, validate_payload,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Plan name used when neither the payload nor a plan supplies one
const CUSTOM_PLAN_NAME: &str = "Custom";

/// Response to a member creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreated {
    pub member: MemberView,
    /// Only present when a new login was created; shown once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}

#[derive(Clone)]
pub struct MemberService {
    members: MemberRepository,
    users: UserRepository,
    plans: PlanRepository,
}

impl MemberService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            members: MemberRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            plans: PlanRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        caller: &CurrentUser,
        payload: MemberCreate,
        today: NaiveDate,
    ) -> AppResult<MemberCreated> {
        validate_payload(&payload)?;
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&payload.phone, "phone", MAX_PHONE_LEN)?;
        let org = caller.organization_id.as_str();

        let terms = self.plan_terms(org, &payload).await?;
        validate_non_negative(terms.amount, "amount")?;
        let start = payload.start_date.unwrap_or(today);
        let subscription =
            membership::start_subscription(terms, start, payload.auto_renewal.unwrap_or(false))?;

        let email = payload.email.as_deref().map(normalize_email);
        let (user_id, temporary_password) = match &email {
            Some(email) => {
                let (id, password) = self.link_user(org, email, &payload.name).await?;
                (Some(id), password)
            }
            None => (None, None),
        };

        let now = now_millis();
        let member = Member {
            id: new_id(),
            organization_id: org.to_string(),
            user_id,
            name: payload.name.trim().to_string(),
            email,
            phone: payload.phone.trim().to_string(),
            address: payload.address,
            emergency_contact: payload.emergency_contact,
            membership_number: membership_number(),
            subscription,
            join_date: start,
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = self.members.create(&member).await {
            // A login created for this member must not outlive it
            if let (Some(user_id), Some(_)) = (&member.user_id, &temporary_password) {
                discard_user(&self.users, user_id).await;
            }
            return Err(e.into());
        }

        tracing::info!(
            organization_id = %org,
            member_id = %member.id,
            membership_number = %member.membership_number,
            end_date = %member.subscription.end_date,
            "Member created"
        );

        Ok(MemberCreated {
            member: membership::view(member, today),
            temporary_password,
        })
    }

    /// Explicit `planDuration` (days) wins; otherwise the referenced plan's
    /// own duration applies
    async fn plan_terms(&self, org: &str, payload: &MemberCreate) -> AppResult<PlanTerms> {
        let plan = match &payload.plan_id {
            Some(plan_id) => Some(
                self.plans
                    .find_by_id(org, plan_id)
                    .await?
                    .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?,
            ),
            None => None,
        };

        let term = match (payload.plan_duration, &plan) {
            (Some(days), _) => Term::Days(days),
            (None, Some(plan)) => Term::from_plan(plan),
            (None, None) => {
                return Err(AppError::validation("planDuration or planId is required")
                    .with_detail("fields", vec!["planDuration", "planId"]));
            }
        };

        let plan_name = payload
            .plan_name
            .clone()
            .or_else(|| plan.as_ref().map(|p| p.name.clone()))
            .unwrap_or_else(|| CUSTOM_PLAN_NAME.to_string());
        let amount = payload
            .amount
            .or_else(|| plan.as_ref().map(|p| p.amount))
            .unwrap_or(Decimal::ZERO);

        Ok(PlanTerms {
            plan_id: payload.plan_id.clone(),
            plan_name,
            amount,
            term,
        })
    }

    /// Id of the login for `email`, plus a temporary password when it had
    /// to be created
    async fn link_user(
        &self,
        org: &str,
        email: &str,
        name: &str,
    ) -> AppResult<(String, Option<String>)> {
        if let Some(existing) = self.users.find_by_email(email).await? {
            if existing.organization_id != org {
                return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
            }
            tracing::debug!(user_id = %existing.id, "Reusing existing user for member");
            return Ok((existing.id, None));
        }

        let password = temporary_password();
        let password_hash = hash_password(&password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        let user = User {
            id: new_id(),
            email: email.to_string(),
            name: name.trim().to_string(),
            password_hash,
            role: UserRole::Member,
            organization_id: org.to_string(),
            is_active: true,
            created_at: now_millis(),
        };
        self.users.create(&user).await.map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
            other => other.into(),
        })?;
        Ok((user.id, Some(password)))
    }

    pub async fn get(&self, org: &str, id: &str, today: NaiveDate) -> AppResult<MemberView> {
        let member = self.load(org, id).await?;
        Ok(membership::view(member, today))
    }

    pub async fn list(
        &self,
        org: &str,
        filter: &MemberFilter,
        page: PageRequest,
        today: NaiveDate,
    ) -> AppResult<Paginated<MemberView>> {
        let members = self.members.list(org, filter, page).await?;
        Ok(members.map(|m| membership::view(m, today)))
    }

    /// Edit profile fields and, explicitly, the subscription
    pub async fn update(
        &self,
        org: &str,
        id: &str,
        payload: MemberUpdate,
        today: NaiveDate,
    ) -> AppResult<MemberView> {
        validate_payload(&payload)?;
        let mut member = self.load(org, id).await?;

        if let Some(name) = payload.name {
            member.name = name.trim().to_string();
        }
        if let Some(email) = payload.email {
            member.email = Some(normalize_email(&email));
        }
        if let Some(phone) = payload.phone {
            member.phone = phone.trim().to_string();
        }
        if let Some(address) = payload.address {
            member.address = Some(address);
        }
        if let Some(contact) = payload.emergency_contact {
            member.emergency_contact = Some(contact);
        }
        if let Some(update) = payload.subscription {
            apply_subscription_update(&mut member.subscription, update)?;
        }
        member.updated_at = now_millis();

        if !self.members.save(&member).await? {
            return Err(AppError::member_not_found());
        }
        Ok(membership::view(member, today))
    }

    pub async fn delete(&self, org: &str, id: &str) -> AppResult<()> {
        if !self.members.delete(org, id).await? {
            return Err(AppError::member_not_found());
        }
        tracing::info!(organization_id = %org, member_id = %id, "Member deleted");
        Ok(())
    }

    async fn load(&self, org: &str, id: &str) -> AppResult<Member> {
        self.members
            .find_by_id(org, id)
            .await?
            .ok_or_else(AppError::member_not_found)
    }
}

fn apply_subscription_update(
    subscription: &mut Subscription,
    update: SubscriptionUpdate,
) -> AppResult<()> {
    if let Some(plan_id) = update.plan_id {
        subscription.plan_id = Some(plan_id);
    }
    if let Some(plan_name) = update.plan_name {
        subscription.plan_name = plan_name;
    }
    if let Some(start) = update.start_date {
        subscription.start_date = start;
    }
    if let Some(end) = update.end_date {
        subscription.end_date = end;
    }
    if let Some(amount) = update.amount {
        validate_non_negative(amount, "subscription.amount")?;
        subscription.amount = amount;
    }
    if let Some(status) = update.status {
        subscription.status = status;
    }
    if let Some(auto_renewal) = update.auto_renewal {
        subscription.auto_renewal = auto_renewal;
    }
    membership::lifecycle::ensure_dates_ordered(subscription.start_date, subscription.end_date)
}

/// Best-effort removal of a just-created login after its second write failed
pub(crate) async fn discard_user(users: &UserRepository, user_id: &str) {
    if let Err(e) = users.delete(user_id).await {
        tracing::error!(user_id = %user_id, error = %e, "Failed to remove orphaned user");
    } else {
        tracing::warn!(user_id = %user_id, "Removed user after failed follow-up write");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SubscriptionStatus;

    fn subscription() -> Subscription {
        Subscription {
            plan_id: None,
            plan_name: "Monthly".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            amount: Decimal::from(1000),
            status: SubscriptionStatus::Suspended,
            auto_renewal: false,
        }
    }

    #[test]
    fn test_subscription_update_keeps_unset_fields() {
        let mut sub = subscription();
        apply_subscription_update(
            &mut sub,
            SubscriptionUpdate {
                status: Some(SubscriptionStatus::Active),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.plan_name, "Monthly");
        assert_eq!(sub.end_date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_subscription_update_rejects_inverted_dates() {
        let mut sub = subscription();
        let err = apply_subscription_update(
            &mut sub,
            SubscriptionUpdate {
                end_date: NaiveDate::from_ymd_opt(2024, 12, 1),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSubscriptionDates);
    }
}
