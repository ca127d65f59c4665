//! Session JWT claims

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a session token.
///
/// # Example
///
/// ```rust
/// use community_auth::SessionClaims;
/// use uuid::Uuid;
///
/// let user_id = Uuid::now_v7();
/// let claims = SessionClaims::new(user_id, "ben", "community", chrono::Duration::hours(24));
/// assert_eq!(claims.user_id(), Some(user_id));
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    // Standard JWT claims (RFC 7519)
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Username at the time the session was issued
    pub username: String,
}

impl SessionClaims {
    /// Create new session claims for a user.
    pub fn new(
        user_id: Uuid,
        username: impl Into<String>,
        issuer: impl Into<String>,
        duration: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iss: issuer.into(),
            exp: (now + duration).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            username: username.into(),
        }
    }

    /// Get the user ID from the subject claim.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get the expiration time.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::now_v7();
        let claims = SessionClaims::new(user_id, "jess", "community", Duration::hours(1));

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.iss, "community");
        assert_eq!(claims.username, "jess");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_expiration() {
        let claims = SessionClaims::new(Uuid::now_v7(), "jess", "community", Duration::hours(-1));

        assert!(claims.is_expired());
        assert!(claims.expires_at() < Utc::now());
    }

    #[test]
    fn test_bad_subject() {
        let mut claims = SessionClaims::new(Uuid::now_v7(), "jess", "community", Duration::hours(1));
        claims.sub = "not-a-uuid".to_string();

        assert_eq!(claims.user_id(), None);
    }
}
