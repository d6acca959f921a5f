//! JWT token service
//!
//! Issues and verifies the HS256 credential carried in the auth cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use shared::models::UserRole;
use thiserror::Error;

use crate::core::ConfigError;

const MIN_SECRET_LEN: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 secret (at least 32 bytes)
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Read `JWT_*` variables. Outside development a missing or short
    /// secret is a configuration error; in development a random key is
    /// generated, so tokens do not survive a restart.
    pub fn from_env(environment: &str) -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Ok(_) => {
                return Err(ConfigError::Invalid {
                    name: "JWT_SECRET",
                    reason: format!("must be at least {MIN_SECRET_LEN} characters long"),
                });
            }
            Err(_) if environment == "development" => {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                generate_printable_secret()
            }
            Err(_) => return Err(ConfigError::MissingSecret("JWT_SECRET", environment.into())),
        };

        Ok(Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7 * 24 * 60),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "gym-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "gym-dashboard".to_string()),
        })
    }

    /// Defaults with an explicit secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: 7 * 24 * 60,
            issuer: "gym-server".to_string(),
            audience: "gym-dashboard".to_string(),
        }
    }
}

/// 64-char alphanumeric key for development
pub fn generate_printable_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Organization id (tenant)
    pub org: String,
    pub role: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign a token for a user of an organization
    pub fn generate_token(
        &self,
        user_id: &str,
        organization_id: &str,
        role: UserRole,
        email: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            org: organization_id.to_string(),
            role: role.as_str().to_string(),
            email: email.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Verify signature, expiry, issuer and audience
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Token lifetime in seconds (cookie `Max-Age`)
    pub fn max_age_seconds(&self) -> i64 {
        self.config.expiration_minutes * 60
    }

    /// Strip the `Bearer ` prefix of an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated caller, built from verified claims
///
/// Inserted into request extensions by [`crate::auth::require_auth`];
/// handlers take it as an extractor argument and pass `organization_id`
/// to every query.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub organization_id: String,
    pub role: UserRole,
    pub email: String,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| JwtError::InvalidToken(format!("unknown role {}", claims.role)))?;
        if claims.org.is_empty() {
            return Err(JwtError::InvalidToken("missing organization".into()));
        }
        Ok(Self {
            user_id: claims.sub,
            organization_id: claims.org,
            role,
            email: claims.email,
        })
    }
}

impl CurrentUser {
    pub fn is_owner(&self) -> bool {
        self.role == UserRole::GymOwner
    }

    /// Gym owner or trainer
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::GymOwner | UserRole::Trainer)
    }
}
