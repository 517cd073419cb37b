//! Access and refresh tokens.
//!
//! Access tokens are HS256 JWTs carrying [`Claims`]. Refresh tokens are opaque
//! strings handed to the client once; the sessions table only ever sees their
//! SHA-256 hex digest.

use chrono::{Duration, Utc};
use cinema_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 15;

/// Payload of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// `admin` or `user`, derived from `users.is_admin` at sign-in.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (default 15)
    /// and `JWT_REFRESH_EXPIRY_DAYS` (default 15).
    ///
    /// # Panics
    ///
    /// Panics on a missing or empty secret and on non-numeric lifetimes.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    /// Access token lifetime, as reported to clients in `expires_in`.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Expiry of a refresh session opened at `now`.
    pub fn refresh_expires_at(&self, now: Timestamp) -> Timestamp {
        now + Duration::days(self.refresh_token_expiry_days)
    }

    /// Sign an access token for a user.
    pub fn issue_access_token(
        &self,
        user_id: DbId,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role: role.to_owned(),
            exp: iat + self.access_token_ttl_secs(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry of an access token and return its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a whole number, got {raw:?}")),
        Err(_) => default,
    }
}

/// A freshly minted refresh token and the digest to persist for it.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// Returned to the client, never stored.
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = Self::hash(&plaintext);
        Self { plaintext, hash }
    }

    /// SHA-256 hex digest, the form sessions are looked up by.
    pub fn hash(token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".into(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_carries_user_and_role() {
        let config = config();
        let token = config.issue_access_token(42, "admin").unwrap();
        let claims = config.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, config.access_token_ttl_secs());
    }

    #[test]
    fn expired_or_foreign_tokens_are_rejected() {
        let config = config();
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: 1,
            role: "user".into(),
            exp: now - 600,
            iat: now - 1200,
            jti: "stale".into(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(config.verify_access_token(&token).is_err());

        let other = JwtConfig {
            secret: "someone-else".into(),
            ..config.clone()
        };
        let token = other.issue_access_token(1, "user").unwrap();
        assert!(config.verify_access_token(&token).is_err());
    }

    #[test]
    fn refresh_tokens_hash_to_their_stored_form() {
        let first = RefreshToken::generate();
        let second = RefreshToken::generate();

        assert_ne!(first.plaintext, second.plaintext);
        assert_eq!(first.hash, RefreshToken::hash(&first.plaintext));
        assert_eq!(first.hash.len(), 64);
    }

    #[test]
    fn refresh_expiry_uses_configured_days() {
        let now = Utc::now();
        assert_eq!(config().refresh_expires_at(now) - now, Duration::days(7));
    }
}
