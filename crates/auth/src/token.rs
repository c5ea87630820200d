//! Session token codec.
//!
//! Signature verification lives here; deterministic claim checks (time
//! window) go through [`validate_claims`] so they stay testable without key
//! material.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use tasklane_core::UserId;

use crate::{JwtClaims, Role, TokenValidationError, UserStatus, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("failed to decode token: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("malformed claim timestamp")]
    MalformedTimestamp,

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Encode/decode session tokens.
///
/// `decode` must reject bad signatures and invalid claim windows; callers
/// treat any error as "anonymous request" and let the guard decide.
pub trait TokenCodec: Send + Sync {
    fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError>;
    fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Wire shape of the claims (JWT-standard numeric timestamps).
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: Uuid,
    name: String,
    email: String,
    roles: Vec<Role>,
    status: UserStatus,
    iat: i64,
    exp: i64,
}

/// HS256 (shared-secret) token codec.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256TokenCodec {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn encode(&self, claims: &JwtClaims) -> Result<String, TokenError> {
        let wire = WireClaims {
            sub: *claims.sub.as_uuid(),
            name: claims.display_name.clone(),
            email: claims.email.clone(),
            roles: claims.roles.clone(),
            status: claims.status,
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map_err(TokenError::Encode)
    }

    fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time-window checks run through `validate_claims` below.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding, &validation)
            .map_err(TokenError::Decode)?;
        let wire = data.claims;

        let claims = JwtClaims {
            sub: UserId::from_uuid(wire.sub),
            display_name: wire.name,
            email: wire.email,
            roles: wire.roles,
            status: wire.status,
            issued_at: DateTime::<Utc>::from_timestamp(wire.iat, 0)
                .ok_or(TokenError::MalformedTimestamp)?,
            expires_at: DateTime::<Utc>::from_timestamp(wire.exp, 0)
                .ok_or(TokenError::MalformedTimestamp)?,
        };

        validate_claims(&claims, now)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims_at(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            display_name: "Eve".to_string(),
            email: "eve@example.com".to_string(),
            roles: vec![Role::Admin],
            status: UserStatus::Active,
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn roundtrip_preserves_identity_roles_and_status() {
        let codec = Hs256TokenCodec::from_secret(b"test-secret");
        let now = Utc::now();
        let claims = claims_at(now);

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.decode(&token, now).unwrap();

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, claims.email);
        assert_eq!(decoded.roles, claims.roles);
        assert_eq!(decoded.status, claims.status);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let codec = Hs256TokenCodec::from_secret(b"test-secret");
        let other = Hs256TokenCodec::from_secret(b"other-secret");
        let now = Utc::now();

        let token = codec.encode(&claims_at(now)).unwrap();
        assert!(matches!(other.decode(&token, now), Err(TokenError::Decode(_))));
    }

    #[test]
    fn expired_token_is_rejected_deterministically() {
        let codec = Hs256TokenCodec::from_secret(b"test-secret");
        let now = Utc::now();

        let token = codec.encode(&claims_at(now)).unwrap();
        let later = now + Duration::hours(1);
        assert!(matches!(
            codec.decode(&token, later),
            Err(TokenError::Claims(TokenValidationError::Expired))
        ));
    }
}
