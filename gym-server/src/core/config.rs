use thiserror::Error;

use crate::auth::JwtConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in {1} environment")]
    MissingSecret(&'static str, String),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 3000 | HTTP port |
/// | DATA_DIR | ./data | SurrealKV directory |
/// | DB_NAMESPACE | gym | SurrealDB namespace |
/// | DB_DATABASE | main | SurrealDB database |
/// | DB_IN_MEMORY | false | use the in-memory engine |
/// | JWT_SECRET | dev key | HS256 secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
/// | JWT_ISSUER / JWT_AUDIENCE | gym-server / gym-dashboard | token claims |
/// | AUTH_COOKIE_NAME | token | credential cookie |
/// | AUTH_COOKIE_SECURE | true in production | `Secure` cookie attribute |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | LOG_LEVEL / LOG_JSON / LOG_DIR | | logging |
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub http_host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub db_namespace: String,
    pub db_database: String,
    pub db_in_memory: bool,
    pub jwt: JwtConfig,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub request_timeout_ms: u64,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env_or("ENVIRONMENT", "development");
        let jwt = JwtConfig::from_env(&environment)?;
        let is_production = environment == "production";

        Ok(Self {
            http_host: env_or("HTTP_HOST", "0.0.0.0"),
            http_port: env_parse("HTTP_PORT", 3000),
            data_dir: env_or("DATA_DIR", "./data"),
            db_namespace: env_or("DB_NAMESPACE", "gym"),
            db_database: env_or("DB_DATABASE", "main"),
            db_in_memory: env_parse("DB_IN_MEMORY", false),
            jwt,
            cookie_name: env_or("AUTH_COOKIE_NAME", "token"),
            cookie_secure: env_parse("AUTH_COOKIE_SECURE", is_production),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            log_level: std::env::var("LOG_LEVEL").ok().filter(|s| !s.is_empty()),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Development configuration on the in-memory engine, independent of the
    /// process environment
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            environment: "development".into(),
            http_host: "127.0.0.1".into(),
            http_port: 0,
            data_dir: String::new(),
            db_namespace: "gym".into(),
            db_database: "main".into(),
            db_in_memory: true,
            jwt: JwtConfig::with_secret(jwt_secret),
            cookie_name: "token".into(),
            cookie_secure: false,
            request_timeout_ms: 30_000,
            log_level: None,
            log_json: false,
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
