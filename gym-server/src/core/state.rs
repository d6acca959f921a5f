//! Shared server state

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::biometric::{BiometricDevice, MockBiometricDevice};
use crate::utils::AppResult;

/// State handed to every handler
///
/// Cheap to clone; holds no per-request data and no locks.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Fingerprint capture/match backend
    pub biometric: Arc<dyn BiometricDevice>,
}

impl ServerState {
    /// Open the database and build the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::open(config).await?;
        Ok(Self::new(config.clone(), db))
    }

    /// Assemble state around an existing database handle
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            biometric: Arc::new(MockBiometricDevice::new()),
        }
    }

    /// Swap the biometric backend
    pub fn with_biometric_device(mut self, device: Arc<dyn BiometricDevice>) -> Self {
        self.biometric = device;
        self
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
