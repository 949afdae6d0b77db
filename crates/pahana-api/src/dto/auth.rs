//! Authentication request DTOs

use chrono::NaiveDate;
use pahana_services::Registration;
use serde::Deserialize;
use validator::Validate;

/// Customer or admin login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Customer self-registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "email must be valid"))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            password: req.password,
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            dob: req.dob,
        }
    }
}
