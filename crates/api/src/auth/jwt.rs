//! Session tokens.
//!
//! A login hands out two tokens: a short-lived HS256 access JWT carrying the
//! user's id and role, and an opaque refresh token. The server only ever
//! stores the SHA-256 fingerprint of a refresh token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use muraja_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Seconds of clock drift tolerated when checking `exp`.
const CLOCK_LEEWAY_SECS: u64 = 30;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// `ADMIN`, `USTAZ` or `STUDENT` at the time of login.
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (default 60)
    /// and `JWT_REFRESH_EXPIRY_DAYS` (default 7).
    ///
    /// # Panics
    ///
    /// Panics on a missing or empty secret and on non-numeric expiries.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be an integer, got {raw:?}")),
        Err(_) => default,
    }
}

/// Sign an access token for `user_id` valid for [`JwtConfig::access_ttl`].
pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role: role.to_owned(),
        iat: now.timestamp(),
        exp: (now + config.access_ttl()).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry of an access token and return its claims.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_LEEWAY_SECS;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client,
/// `fingerprint` into `user_sessions.refresh_token_hash`.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub plaintext: String,
    pub fingerprint: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let fingerprint = fingerprint(&plaintext);
        Self {
            plaintext,
            fingerprint,
        }
    }
}

/// Lowercase hex SHA-256 of a refresh token.
pub fn fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn issued_token_decodes_to_same_user() {
        let cfg = config("unit-secret");
        let token = issue_access_token(42, "USTAZ", &cfg).unwrap();
        let claims = decode_access_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "USTAZ");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config("unit-secret");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: 1,
            role: "STUDENT".into(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .unwrap();

        assert!(decode_access_token(&token, &cfg).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = issue_access_token(1, "STUDENT", &config("alpha")).unwrap();
        assert!(decode_access_token(&token, &config("bravo")).is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let cfg = config("unit-secret");
        let token = issue_access_token(7, "STUDENT", &cfg).unwrap();
        let forged = issue_access_token(7, "ADMIN", &config("attacker")).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = forged.split('.').nth(1).unwrap();
        parts[1] = forged_payload;

        assert!(decode_access_token(&parts.join("."), &cfg).is_err());
    }

    #[test]
    fn refresh_tokens_are_unique_and_fingerprinted() {
        let a = RefreshToken::generate();
        let b = RefreshToken::generate();

        assert_ne!(a.plaintext, b.plaintext);
        assert_eq!(a.fingerprint, fingerprint(&a.plaintext));
        assert_eq!(a.fingerprint.len(), 64);
        assert!(a.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ttl_helpers_follow_config() {
        let cfg = JwtConfig {
            secret: "s".into(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 30,
        };
        assert_eq!(cfg.access_ttl(), Duration::minutes(15));
        assert_eq!(cfg.refresh_ttl(), Duration::days(30));
    }
}
