//! Payment recorder
//!
//! Records a payment against a member of the caller's organization. A
//! `membership` or `renewal` payment also renews the member's subscription
//! in the same transaction.

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{MemberView, Payment, PaymentCreate, PaymentStatus, RevenueStats};
use shared::util::{new_id, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::db::repository::payment::{RECENT_LIMIT, Renewal};
use crate::db::repository::{MemberRepository, PaymentRepository, RepoError};
use crate::membership;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Tries before a renewal that keeps losing races answers 409
const RENEWAL_ATTEMPTS: u32 = 5;
const RETRY_BACKOFF_MS: u64 = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPayment {
    pub payment: Payment,
    /// Member after the renewal, for renewing payment types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberView>,
}

/// Payment list with revenue aggregates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOverview {
    pub payments: Vec<Payment>,
    pub stats: RevenueStats,
}

#[derive(Clone)]
pub struct PaymentRecorder {
    payments: PaymentRepository,
    members: MemberRepository,
}

impl PaymentRecorder {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            payments: PaymentRepository::new(db.clone()),
            members: MemberRepository::new(db),
        }
    }

    pub async fn record(
        &self,
        caller: &CurrentUser,
        payload: PaymentCreate,
        today: NaiveDate,
    ) -> AppResult<RecordedPayment> {
        validate_payload(&payload)?;
        if payload.amount <= Decimal::ZERO {
            return Err(AppError::new(ErrorCode::PaymentInvalidAmount)
                .with_detail("amount", payload.amount.to_string()));
        }

        let org = caller.organization_id.as_str();
        let mut member = self
            .members
            .find_by_id(org, &payload.member_id)
            .await?
            .ok_or_else(AppError::member_not_found)?;

        let now = now_millis();
        let payment = Payment {
            id: new_id(),
            organization_id: org.to_string(),
            member_id: member.id.clone(),
            member_name: Some(member.name.clone()),
            amount: payload.amount,
            method: payload.method,
            payment_type: payload.payment_type,
            status: PaymentStatus::Completed,
            payment_date: now,
            transaction_id: payload.transaction_id,
            notes: payload.notes,
            created_by: caller.user_id.clone(),
        };

        if !payload.payment_type.renews_subscription() {
            self.payments.record(&payment, None).await?;
            tracing::info!(
                organization_id = %org,
                payment_id = %payment.id,
                member_id = %member.id,
                amount = %payment.amount,
                "Payment recorded"
            );
            return Ok(RecordedPayment {
                payment,
                member: None,
            });
        }

        for attempt in 1..=RENEWAL_ATTEMPTS {
            if attempt > 1 {
                tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt))).await;
                member = self
                    .members
                    .find_by_id(org, &payload.member_id)
                    .await?
                    .ok_or_else(AppError::member_not_found)?;
            }

            let renewed = membership::renew(&member.subscription)?;
            let renewal = Renewal {
                member_id: member.id.clone(),
                previous_end_date: member.subscription.end_date,
                end_date: renewed.end_date,
            };
            match self.payments.record(&payment, Some(&renewal)).await {
                Ok(()) => {}
                Err(RepoError::Conflict(reason)) => {
                    tracing::debug!(
                        organization_id = %org,
                        member_id = %member.id,
                        attempt,
                        reason = %reason,
                        "Renewal raced with another write"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            tracing::info!(
                organization_id = %org,
                payment_id = %payment.id,
                member_id = %member.id,
                amount = %payment.amount,
                previous_end_date = %renewal.previous_end_date,
                end_date = %renewed.end_date,
                "Payment recorded with renewal"
            );

            member.subscription = renewed;
            member.updated_at = now;
            return Ok(RecordedPayment {
                payment,
                member: Some(membership::view(member, today)),
            });
        }

        tracing::warn!(
            organization_id = %org,
            member_id = %member.id,
            attempts = RENEWAL_ATTEMPTS,
            "Renewal gave up after repeated conflicts"
        );
        Err(AppError::new(ErrorCode::ConcurrentModification).with_detail("memberId", member.id))
    }

    /// The most recent payments plus revenue totals
    pub async fn overview(&self, org: &str, today: NaiveDate) -> AppResult<PaymentOverview> {
        let payments = self.payments.list_recent(org, RECENT_LIMIT).await?;
        let stats = self.payments.revenue(org, today).await?;
        Ok(PaymentOverview { payments, stats })
    }
}
