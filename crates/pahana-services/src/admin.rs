//! Back-office admin authentication

use pahana_auth::PasswordService;
use pahana_core::models::User;
use pahana_core::traits::UserStore;
use pahana_core::AppError;
use std::sync::Arc;
use tracing::{info, instrument};

/// Credential checks for back-office users
#[derive(Clone)]
pub struct AdminAuth {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
}

impl AdminAuth {
    pub fn new(users: Arc<dyn UserStore>, passwords: PasswordService) -> Self {
        Self { users, passwords }
    }

    /// Check credentials and record the login time
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.passwords.verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        user.last_login = Some(chrono::Utc::now());
        let user = self.users.save(user).await?;
        info!(username = %user.username, "Admin login");
        Ok(user)
    }
}
