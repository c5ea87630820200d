use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tasklane_core::UserId;

use crate::{Role, User, UserStatus};

/// JWT claims model (transport-agnostic).
///
/// This is the minimal set of claims tasklane expects once a token has been
/// decoded and its signature verified by the token codec in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Display name carried for the session header.
    pub display_name: String,

    /// Account email.
    pub email: String,

    /// RBAC roles granted to the subject.
    pub roles: Vec<Role>,

    /// Account status at issue time.
    pub status: UserStatus,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    /// Materialize the user snapshot these claims describe.
    pub fn to_user(&self) -> User {
        User::with_roles(
            self.sub,
            self.display_name.clone(),
            self.email.clone(),
            self.status,
            self.roles.iter().copied(),
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate JWT claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is the token codec's job.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            display_name: "Dave".to_string(),
            email: "dave@example.com".to_string(),
            roles: vec![Role::User],
            status: UserStatus::Active,
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn valid_window_passes() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(1), now + Duration::minutes(10));
        assert!(validate_claims(&c, now).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let c = claims(now - Duration::minutes(20), now - Duration::minutes(10));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_token_is_rejected() {
        let now = Utc::now();
        let c = claims(now + Duration::minutes(5), now + Duration::minutes(15));
        assert_eq!(validate_claims(&c, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let now = Utc::now();
        let c = claims(now, now - Duration::minutes(1));
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn to_user_carries_identity_and_roles() {
        let now = Utc::now();
        let c = claims(now, now + Duration::minutes(10));
        let user = c.to_user();

        assert_eq!(user.id, c.sub);
        assert_eq!(user.email, "dave@example.com");
        assert_eq!(user.status, UserStatus::Active);
        assert!(crate::has_role(Some(&user), Role::User));
    }
}
