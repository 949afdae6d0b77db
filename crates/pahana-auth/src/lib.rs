//! Authentication and authorization for the Pahana Books backend
//!
//! Provides JWT-based authentication, Argon2 password hashing, and
//! Actix-web request extractors for role-based access control.
//!
//! # Examples
//!
//! ## Creating a JWT token
//!
//! ```no_run
//! use pahana_auth::{JwtService, Claims};
//! use pahana_core::models::UserRole;
//!
//! let jwt_service = JwtService::new("your-secret-key", 3600);
//! let claims = Claims::new("admin", UserRole::Admin);
//! let token = jwt_service.create_token(&claims)?;
//! # Ok::<(), pahana_core::error::AppError>(())
//! ```
//!
//! ## Password hashing
//!
//! ```no_run
//! use pahana_auth::PasswordService;
//!
//! let password_service = PasswordService::new();
//! let hash = password_service.hash_password("secure_password")?;
//! assert!(password_service.verify_password("secure_password", &hash)?);
//! # Ok::<(), pahana_core::error::AppError>(())
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthenticatedUser};
pub use password::PasswordService;

#[cfg(test)]
mod tests {
    use super::*;
    use pahana_core::models::UserRole;

    #[test]
    fn test_integration_jwt_and_password() {
        let password_service = PasswordService::new();
        let jwt_service = JwtService::new("test-secret-key-12345", 3600);

        let hash = password_service.hash_password("my_secure_password").unwrap();
        assert!(password_service
            .verify_password("my_secure_password", &hash)
            .unwrap());
        assert!(!password_service
            .verify_password("wrong_password", &hash)
            .unwrap());

        let claims = Claims::new("jane", UserRole::Customer);
        let token = jwt_service.create_token(&claims).unwrap();
        let decoded = jwt_service.validate_token(&token).unwrap();

        assert_eq!(decoded.sub, "jane");
        assert_eq!(decoded.role, UserRole::Customer);
    }
}
