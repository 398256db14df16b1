//! Bearer-token authentication.
//!
//! Identity is carried in an HS256-signed JWT presented as
//! `Authorization: Bearer <token>`. The token resolves to a [`UserId`];
//! role checks are done per request against the stored account record, not
//! against token contents, so revoking admin takes effect immediately.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AppError;
use super::state::AppState;
use crate::api::UserId;

/// Default access token lifetime in seconds (15 minutes).
const DEFAULT_TOKEN_TTL_SECS: i64 = 900;

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to
    pub sub: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Token id
    pub jti: String,
}

/// Token signing/verification settings.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    token_ttl_secs: i64,
}

impl AuthConfig {
    /// Create a configuration with an explicit secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Override the access token lifetime.
    pub fn with_token_ttl_secs(mut self, ttl: i64) -> Self {
        self.token_ttl_secs = ttl;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `JWT_SECRET` (required): HS256 signing secret
    /// - `TOKEN_TTL_SECS` (optional, default 900): access token lifetime
    pub fn from_env() -> Result<Self, String> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }

    /// Mint an access token for a user.
    pub fn generate_access_token(
        &self,
        user_id: UserId,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_ttl_secs);

        let claims = Claims {
            sub: user_id.value(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
    }

    /// Validate a token and return its claims.
    ///
    /// Expiry is checked by the decoder.
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret
        f.debug_struct("AuthConfig")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Authenticated caller, extracted from the `Authorization` header.
///
/// Rejection is a 401 with the usual `{"msg": ...}` body. Handlers that
/// need the admin role additionally call `services::is_admin`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;

        let claims = state
            .auth
            .validate_token(&token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: UserId::new(claims.sub),
        })
    }
}

fn extract_bearer_token(parts: &Parts) -> Result<String, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization Header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization Header".to_string()))?;

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_validate_token() {
        let config = AuthConfig::new("test-secret");
        let user_id = UserId::new(7);

        let token = config
            .generate_access_token(user_id)
            .expect("Failed to generate token");
        let claims = config.validate_token(&token).expect("Failed to validate token");

        assert_eq!(claims.sub, 7);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig::new("test-secret").with_token_ttl_secs(-100);
        let token = config.generate_access_token(UserId::new(1)).unwrap();

        assert!(config.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = AuthConfig::new("test-secret");
        let other = AuthConfig::new("other-secret");

        let token = config.generate_access_token(UserId::new(1)).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = AuthConfig::new("super-secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
    }
}
