//! Database Module
//!
//! Embedded SurrealDB: SurrealKV on disk, or the in-memory engine for tests
//! and `DB_IN_MEMORY=true`.

pub mod repository;
pub mod scope;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, SurrealKv};

use crate::core::Config;
use crate::utils::AppError;

/// Statements applied on every start; all idempotent
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS organization SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS member SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS payment SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS plan SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS lead SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS trainer SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS attendance SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS biometric SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS member_org ON TABLE member FIELDS organizationId;
    DEFINE INDEX IF NOT EXISTS payment_org ON TABLE payment FIELDS organizationId;
    DEFINE INDEX IF NOT EXISTS attendance_org_date ON TABLE attendance FIELDS organizationId, date;
    DEFINE INDEX IF NOT EXISTS lead_org ON TABLE lead FIELDS organizationId;
    DEFINE INDEX IF NOT EXISTS biometric_org_user ON TABLE biometric FIELDS organizationId, userId;
"#;

/// Database service: opens the engine and applies the schema
pub struct DbService;

impl DbService {
    pub async fn open(config: &Config) -> Result<Surreal<Db>, AppError> {
        let db = if config.db_in_memory {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?
        } else {
            std::fs::create_dir_all(&config.data_dir).map_err(|e| {
                AppError::database(format!("Failed to create {}: {e}", config.data_dir))
            })?;
            Surreal::new::<SurrealKv>(config.data_dir.as_str())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        db.use_ns(config.db_namespace.as_str())
            .use_db(config.db_database.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|res| res.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(
            in_memory = config.db_in_memory,
            namespace = %config.db_namespace,
            database = %config.db_database,
            "Database ready"
        );

        Ok(db)
    }

    /// Liveness probe for `/health`
    pub async fn ping(db: &Surreal<Db>) -> bool {
        db.query("RETURN true").await.is_ok()
    }
}
