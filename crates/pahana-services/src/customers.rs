//! Customer directory
//!
//! Registration, credential checks and the admin customer-management
//! surface. Passwords are hashed with Argon2 before they ever reach the
//! store; account numbers come from the injected ID capability.

use chrono::NaiveDate;
use pahana_auth::PasswordService;
use pahana_core::models::Customer;
use pahana_core::traits::CustomerStore;
use pahana_core::{AppError, IdGenerator};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Self-service registration input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
}

/// Partial update accepted on the admin path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Self-service profile update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
}

/// Customer directory over the customer collection
#[derive(Clone)]
pub struct CustomerDirectory {
    customers: Arc<dyn CustomerStore>,
    ids: Arc<dyn IdGenerator>,
    passwords: PasswordService,
}

impl CustomerDirectory {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        ids: Arc<dyn IdGenerator>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            customers,
            ids,
            passwords,
        }
    }

    /// Register a new customer: hashes the password and assigns an `ACC`
    /// account number
    ///
    /// # Errors
    ///
    /// - `Validation` when username, password or name is blank
    /// - `AlreadyExists` when the username is taken
    #[instrument(skip(self, registration))]
    pub async fn register(&self, registration: Registration) -> Result<Customer, AppError> {
        let username = registration.username.trim();
        if username.is_empty() || registration.password.trim().is_empty() {
            return Err(AppError::Validation(
                "username and password are required".to_string(),
            ));
        }
        if registration.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }

        if self.customers.find_by_username(username).await?.is_some() {
            return Err(AppError::AlreadyExists(format!("username {}", username)));
        }

        let customer = Customer {
            account_number: self.ids.next_account_number(),
            username: username.to_string(),
            name: registration.name.trim().to_string(),
            password: self.passwords.hash_password(&registration.password)?,
            email: registration.email,
            phone: registration.phone,
            address: registration.address,
            dob: registration.dob,
            ..Default::default()
        };

        let saved = self.customers.save(customer).await?;
        info!(
            username = %saved.username,
            account = %saved.account_number,
            "Registered customer"
        );
        Ok(saved)
    }

    /// Check credentials; the caller issues the token on success
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Customer, AppError> {
        let customer = self
            .customers
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.passwords.verify_password(password, &customer.password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(customer)
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.customers.find_all().await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Customer, AppError> {
        self.customers
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {}", username)))
    }

    pub async fn find_by_account_number(&self, account_number: &str) -> Result<Customer, AppError> {
        self.customers
            .find_by_account_number(account_number)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(account_number.to_string()))
    }

    /// Admin path: add a customer record directly
    ///
    /// Name, email and phone are required here; an account number is
    /// generated when the caller does not supply one.
    #[instrument(skip(self, customer))]
    pub async fn admin_add(&self, mut customer: Customer) -> Result<Customer, AppError> {
        if customer.name.trim().is_empty()
            || customer.email.as_deref().unwrap_or("").trim().is_empty()
            || customer.phone.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err(AppError::Validation(
                "name, email and phone are required".to_string(),
            ));
        }

        if customer.account_number.trim().is_empty() {
            customer.account_number = self.ids.next_account_number();
        }
        if !customer.password.is_empty() {
            customer.password = self.passwords.hash_password(&customer.password)?;
        }

        self.customers.save(customer).await
    }

    /// Admin path: partial update by storage id
    #[instrument(skip(self, update))]
    pub async fn update_by_id(
        &self,
        id: &str,
        update: CustomerUpdate,
    ) -> Result<Customer, AppError> {
        let mut customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))?;

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(email) = update.email {
            customer.email = Some(email);
        }
        if let Some(phone) = update.phone {
            customer.phone = Some(phone);
        }
        if let Some(address) = update.address {
            customer.address = Some(address);
        }

        self.customers.save(customer).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.customers.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("customer {}", id)));
        }
        info!(id = %id, "Deleted customer");
        Ok(())
    }

    /// Self-service profile update for the authenticated customer
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<Customer, AppError> {
        let mut customer = self.find_by_username(username).await?;

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(dob) = update.dob {
            customer.dob = Some(dob);
        }

        self.customers.save(customer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pahana_core::CounterIdGenerator;
    use pahana_store::MemoryCustomerStore;

    fn directory() -> CustomerDirectory {
        CustomerDirectory::new(
            Arc::new(MemoryCustomerStore::new()),
            Arc::new(CounterIdGenerator::with_seed(100)),
            PasswordService::new(),
        )
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            password: "secret123".to_string(),
            name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            address: None,
            dob: None,
        }
    }

    #[tokio::test]
    async fn test_register_assigns_account_number_and_hashes_password() {
        let directory = directory();

        let customer = directory.register(registration("jane")).await.unwrap();

        assert!(customer.account_number.starts_with("ACC"));
        assert!(customer.password.starts_with("$argon2"));
        assert_ne!(customer.password, "secret123");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let directory = directory();
        directory.register(registration("jane")).await.unwrap();

        let result = directory.register(registration("jane")).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_requires_credentials() {
        let directory = directory();

        let mut blank = registration("jane");
        blank.password = "  ".to_string();
        let result = directory.register(blank).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let directory = directory();
        directory.register(registration("jane")).await.unwrap();

        let customer = directory.authenticate("jane", "secret123").await.unwrap();
        assert_eq!(customer.username, "jane");

        let result = directory.authenticate("jane", "wrong").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));

        let result = directory.authenticate("nobody", "secret123").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_admin_add_requires_contact_fields() {
        let directory = directory();

        let result = directory
            .admin_add(Customer {
                name: "Jane".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let customer = directory
            .admin_add(Customer {
                name: "Jane".to_string(),
                email: Some("jane@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(customer.account_number.starts_with("ACC"));
    }

    #[tokio::test]
    async fn test_profile_update() {
        let directory = directory();
        directory.register(registration("jane")).await.unwrap();

        let updated = directory
            .update_profile(
                "jane",
                ProfileUpdate {
                    name: Some("Jane Smith".to_string()),
                    dob: NaiveDate::from_ymd_opt(1990, 4, 1),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(updated.dob, NaiveDate::from_ymd_opt(1990, 4, 1));
    }

    #[tokio::test]
    async fn test_delete_unknown_customer() {
        let directory = directory();
        let result = directory.delete("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
