//! Biometric enrollment and verification
//!
//! Capture and matching go through [`BiometricDevice`]. The server ships
//! with [`MockBiometricDevice`]; no vendor SDK is linked.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use shared::models::{Biometric, BiometricUserType, EnrollRequest, VerifyRequest};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::CurrentUser;
use crate::db::repository::biometric::enrollment_key;
use crate::db::repository::{BiometricRepository, MemberRepository, TrainerRepository};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Enrollments scoring below this are rejected
pub const MIN_QUALITY: u8 = 60;

/// Capture/match backend
#[async_trait]
pub trait BiometricDevice: Send + Sync {
    /// Quality score (0..=100) of a captured template
    async fn enroll(&self, template: &str) -> AppResult<u8>;

    /// Whether `probe` matches the `enrolled` template
    async fn verify(&self, enrolled: &str, probe: &str) -> AppResult<bool>;
}

/// Stand-in device: random quality, exact-match verification
#[derive(Debug, Clone, Default)]
pub struct MockBiometricDevice {
    fixed_quality: Option<u8>,
}

impl MockBiometricDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always report `quality` (tests)
    pub fn with_fixed_quality(quality: u8) -> Self {
        Self {
            fixed_quality: Some(quality.min(100)),
        }
    }
}

#[async_trait]
impl BiometricDevice for MockBiometricDevice {
    async fn enroll(&self, _template: &str) -> AppResult<u8> {
        Ok(self
            .fixed_quality
            .unwrap_or_else(|| rand::thread_rng().gen_range(70..=100)))
    }

    async fn verify(&self, enrolled: &str, probe: &str) -> AppResult<bool> {
        Ok(enrolled == probe)
    }
}

/// Outcome of a verification attempt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verified: bool,
    pub user_id: String,
    /// Enrollment that matched
    pub biometric_id: Option<String>,
}

#[derive(Clone)]
pub struct BiometricService {
    biometrics: BiometricRepository,
    members: MemberRepository,
    trainers: TrainerRepository,
    device: Arc<dyn BiometricDevice>,
}

impl BiometricService {
    pub fn new(db: Surreal<Db>, device: Arc<dyn BiometricDevice>) -> Self {
        Self {
            biometrics: BiometricRepository::new(db.clone()),
            members: MemberRepository::new(db.clone()),
            trainers: TrainerRepository::new(db),
            device,
        }
    }

    /// Enroll a template, replacing an earlier one for the same finger
    pub async fn enroll(&self, caller: &CurrentUser, req: EnrollRequest) -> AppResult<Biometric> {
        validate_payload(&req)?;
        let org = &caller.organization_id;

        match req.user_type {
            BiometricUserType::Member => {
                self.members
                    .find_by_id(org, &req.user_id)
                    .await?
                    .ok_or_else(AppError::member_not_found)?;
            }
            BiometricUserType::Trainer => {
                self.trainers
                    .find_by_id(org, &req.user_id)
                    .await?
                    .ok_or_else(|| AppError::new(ErrorCode::TrainerNotFound))?;
            }
        }

        let quality = self.device.enroll(&req.template_data).await?;
        if quality < MIN_QUALITY {
            return Err(AppError::new(ErrorCode::BiometricQualityTooLow)
                .with_detail("quality", quality)
                .with_detail("minimum", MIN_QUALITY));
        }

        let biometric = Biometric {
            id: enrollment_key(org, &req.user_id, req.biometric_type, req.finger_index),
            organization_id: org.clone(),
            user_id: req.user_id,
            user_type: req.user_type,
            biometric_type: req.biometric_type,
            finger_index: req.finger_index,
            template_data: req.template_data,
            quality,
            enrolled_by: caller.user_id.clone(),
            enrollment_date: now_millis(),
            is_active: true,
        };
        self.biometrics.upsert(&biometric).await?;

        tracing::info!(
            organization_id = %org,
            user_id = %biometric.user_id,
            biometric_type = biometric.biometric_type.as_str(),
            finger_index = biometric.finger_index,
            quality,
            "Biometric enrolled"
        );
        Ok(biometric)
    }

    /// Match a probe against the user's active enrollments
    pub async fn verify(&self, organization_id: &str, req: VerifyRequest) -> AppResult<Verification> {
        validate_payload(&req)?;
        let enrolled = self
            .biometrics
            .find_active_for_user(organization_id, &req.user_id, req.biometric_type)
            .await?;
        if enrolled.is_empty() {
            return Err(AppError::new(ErrorCode::BiometricNotFound));
        }

        for candidate in &enrolled {
            if self.device.verify(&candidate.template_data, &req.template_data).await? {
                return Ok(Verification {
                    verified: true,
                    user_id: req.user_id,
                    biometric_id: Some(candidate.id.clone()),
                });
            }
        }

        tracing::warn!(
            organization_id = %organization_id,
            user_id = %req.user_id,
            candidates = enrolled.len(),
            "Biometric verification failed"
        );
        Ok(Verification {
            verified: false,
            user_id: req.user_id,
            biometric_id: None,
        })
    }

    pub async fn list(&self, organization_id: &str, user_id: Option<&str>) -> AppResult<Vec<Biometric>> {
        Ok(self.biometrics.list(organization_id, user_id).await?)
    }
}
