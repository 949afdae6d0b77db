//! Customer model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Customer entity
///
/// `account_number` is the customer-facing identifier used by billing; it is
/// distinct from the opaque storage id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: String,

    pub account_number: String,
    pub username: String,
    pub name: String,

    /// Argon2 password hash, never serialized to the wire
    #[serde(skip_serializing)]
    pub password: String,

    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_photo: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            id: String::new(),
            account_number: String::new(),
            username: String::new(),
            name: String::new(),
            password: String::new(),
            dob: None,
            email: None,
            phone: None,
            address: None,
            profile_photo: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_never_serialized() {
        let customer = Customer {
            username: "jane".to_string(),
            password: "$argon2id$secret".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&customer).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"username\":\"jane\""));
    }
}
