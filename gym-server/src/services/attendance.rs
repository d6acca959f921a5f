//! Check-in and check-out

use chrono::NaiveDate;
use shared::models::{Attendance, CheckInRequest};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::db::repository::attendance::daily_key;
use crate::db::repository::{AttendanceRepository, MemberRepository, RepoError};
use crate::membership;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone)]
pub struct AttendanceService {
    attendance: AttendanceRepository,
    members: MemberRepository,
}

impl AttendanceService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            attendance: AttendanceRepository::new(db.clone()),
            members: MemberRepository::new(db),
        }
    }

    /// Check a member in for `today`; at most once per day
    pub async fn check_in(
        &self,
        caller: &CurrentUser,
        req: CheckInRequest,
        today: NaiveDate,
    ) -> AppResult<Attendance> {
        validate_payload(&req)?;
        let org = caller.organization_id.as_str();
        let member = self
            .members
            .find_by_id(org, &req.member_id)
            .await?
            .ok_or_else(AppError::member_not_found)?;
        membership::ensure_can_check_in(&member.subscription)?;
        if membership::lifecycle::is_lapsed(&member.subscription, today) {
            tracing::warn!(
                organization_id = %org,
                member_id = %member.id,
                end_date = %member.subscription.end_date,
                "Check-in on a lapsed subscription"
            );
        }

        let attendance = Attendance {
            id: daily_key(org, &member.id, today),
            organization_id: org.to_string(),
            member_id: member.id.clone(),
            member_name: Some(member.name.clone()),
            date: today,
            check_in_time: now_millis(),
            check_out_time: None,
            method: req.method,
            verification_method: req.verification_method,
        };

        match self.attendance.create(&attendance).await {
            Ok(()) => {}
            Err(RepoError::Duplicate(_)) => {
                return Err(AppError::new(ErrorCode::AlreadyCheckedIn)
                    .with_detail("memberId", member.id)
                    .with_detail("date", today.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            organization_id = %org,
            member_id = %attendance.member_id,
            date = %today,
            "Member checked in"
        );
        Ok(attendance)
    }

    pub async fn check_out(&self, org: &str, id: &str) -> AppResult<Attendance> {
        let mut attendance = self
            .attendance
            .find_by_id(org, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::AttendanceNotFound))?;
        if attendance.check_out_time.is_some() {
            return Err(AppError::new(ErrorCode::AlreadyCheckedOut));
        }

        attendance.check_out_time = Some(now_millis());
        if !self.attendance.save(&attendance).await? {
            return Err(AppError::new(ErrorCode::AttendanceNotFound));
        }
        Ok(attendance)
    }

    pub async fn list(
        &self,
        org: &str,
        date: NaiveDate,
        member_id: Option<&str>,
    ) -> AppResult<Vec<Attendance>> {
        Ok(self.attendance.list_by_date(org, date, member_id).await?)
    }
}
