//! HS256 JWT access tokens.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use quill_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Longest accepted token lifetime: one year.
const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

/// Signing settings for issued tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "quill-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);
            if production {
                tracing::error!("SECURITY: default JWT secret in production, set JWT_SECRET");
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(clamp_expiration_hours)
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

fn clamp_expiration_hours(hours: i64) -> i64 {
    let clamped = hours.clamp(1, MAX_EXPIRATION_HOURS);
    if clamped != hours {
        tracing::warn!(
            requested = hours,
            used = clamped,
            "JWT_EXPIRATION_HOURS out of range"
        );
    }
    clamped
}

/// Wire claims. `sub` is the username, `uid` the numeric user id.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    uid: i64,
    roles: Vec<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError> {
        let issued_at = Utc::now();
        let expires_at = TimeDelta::try_hours(self.config.expiration_hours)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::InvalidToken("Token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            uid: user_id,
            roles,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(TokenClaims {
            user_id: data.claims.uid,
            username: data.claims.sub,
            roles: data.claims.roles,
            exp: data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours.saturating_mul(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(issuer: &str) -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: issuer.to_string(),
        })
    }

    #[test]
    fn test_roles_survive_round_trip() {
        let tokens = service("quill-test");

        let token = tokens
            .generate_token(7, "ann", vec!["ROLE_USER".into(), "ROLE_ADMIN".into()])
            .unwrap();
        let claims = tokens.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "ann");
        assert!(claims.has_role("ROLE_ADMIN"));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let result = service("quill-test").validate_token("not.a.jwt");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let token = service("someone-else")
            .generate_token(1, "ann", vec![])
            .unwrap();

        assert!(service("quill-test").validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: -2,
            issuer: "quill-test".to_string(),
        });

        let token = tokens.generate_token(1, "ann", vec![]).unwrap();

        assert!(matches!(
            tokens.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_expiration_hours_clamped() {
        assert_eq!(clamp_expiration_hours(i64::MAX), MAX_EXPIRATION_HOURS);
        assert_eq!(clamp_expiration_hours(-5), 1);
        assert_eq!(clamp_expiration_hours(48), 48);
    }

    #[test]
    fn test_huge_lifetime_is_an_error_not_a_panic() {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: i64::MAX,
            issuer: "quill-test".to_string(),
        });

        assert!(tokens.generate_token(1, "ann", vec![]).is_err());
        assert_eq!(tokens.expiration_seconds(), i64::MAX);
    }

    #[test]
    fn test_expiration_seconds() {
        assert_eq!(service("quill-test").expiration_seconds(), 3600);
    }
}
