//! Store collaborator contracts
//!
//! Each entity lives in an id-keyed document collection with simple
//! predicate queries. The engines only ever see these traits; the concrete
//! collections live in `pahana-store`.

use crate::error::AppError;
use crate::models::{Bill, BillStatus, Book, Customer, Order, User};
use async_trait::async_trait;

/// Customer collection
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert or replace, assigning an id on first save
    async fn save(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn find_all(&self) -> Result<Vec<Customer>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, AppError>;

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Customer>, AppError>;

    /// Remove by id; true when a document was removed
    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;
}

/// Bill collection
#[async_trait]
pub trait BillStore: Send + Sync {
    async fn save(&self, bill: Bill) -> Result<Bill, AppError>;

    async fn find_all(&self) -> Result<Vec<Bill>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Bill>, AppError>;

    async fn find_by_bill_number(&self, bill_number: &str) -> Result<Option<Bill>, AppError>;

    /// Bills for one account, newest first
    async fn find_by_account_number(&self, account_number: &str) -> Result<Vec<Bill>, AppError>;

    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, AppError>;

    /// Remove by id; silently a no-op when absent
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;

    /// Remove a previously fetched document
    async fn delete(&self, bill: &Bill) -> Result<(), AppError>;
}

/// Book collection
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn save(&self, book: Book) -> Result<Book, AppError>;

    async fn find_all(&self) -> Result<Vec<Book>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, AppError>;

    async fn count(&self) -> Result<usize, AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;
}

/// Order collection
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn save(&self, order: Order) -> Result<Order, AppError>;

    async fn find_all(&self) -> Result<Vec<Order>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError>;
}

/// Back-office user collection
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn save(&self, user: User) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}
