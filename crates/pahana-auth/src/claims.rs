//! JWT claims structure

use chrono::{Duration, Utc};
use pahana_core::models::UserRole;
use serde::{Deserialize, Serialize};

/// Claims carried in authentication tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Principal role
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims; expiration is filled in by `JwtService`
    pub fn new(username: &str, role: UserRole) -> Self {
        Self {
            sub: username.to_string(),
            role,
            iat: Utc::now().timestamp(),
            exp: 0,
        }
    }

    /// Create new claims with an explicit expiration duration
    pub fn with_expiration(username: &str, role: UserRole, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    pub fn username(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Check if the principal has admin privileges
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("jane", UserRole::Customer);
        assert_eq!(claims.sub, "jane");
        assert_eq!(claims.role, UserRole::Customer);
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_claims_with_expiration() {
        let claims = Claims::with_expiration("admin", UserRole::Admin, 3600);
        assert!(!claims.is_expired());

        let now = Utc::now().timestamp();
        assert!(claims.exp > now);
        assert!(claims.exp <= now + 3600);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new("jane", UserRole::Customer);
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_role_checks() {
        assert!(!Claims::new("jane", UserRole::Customer).is_admin());
        assert!(Claims::new("admin", UserRole::Admin).is_admin());
    }
}
