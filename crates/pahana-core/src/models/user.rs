//! Back-office user model and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal role carried in JWT claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Storefront customer
    #[default]
    Customer,
    /// Back-office administrator
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl UserRole {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(UserRole::Customer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Back-office user entity (admin accounts)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,

    pub username: String,

    /// Argon2 password hash, never serialized to the wire
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub name: String,
    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::new(),
            password_hash: String::new(),
            name: String::new(),
            role: UserRole::Admin,
            created_at: Utc::now(),
            last_login: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_privileges() {
        assert_eq!(UserRole::from_str("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_str("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::from_str("root"), None);
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Customer.is_admin());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            username: "admin".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
