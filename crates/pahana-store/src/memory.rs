//! In-memory document collections
//!
//! Each collection is a `Vec` of documents behind an `RwLock`, keyed by an
//! opaque string id assigned on first save. Insertion order is preserved,
//! which is what the aggregation code relies on for stable encounter order.

use async_trait::async_trait;
use parking_lot::RwLock;
use pahana_core::models::{Bill, BillStatus, Book, Customer, Order, User};
use pahana_core::traits::{BillStore, BookStore, CustomerStore, OrderStore, UserStore};
use pahana_core::AppError;
use uuid::Uuid;

/// Upsert into a vec-backed collection, assigning an id when missing
fn upsert<T, F, G>(docs: &mut Vec<T>, mut doc: T, id_of: F, set_id: G) -> T
where
    T: Clone,
    F: Fn(&T) -> &str,
    G: FnOnce(&mut T, String),
{
    if id_of(&doc).is_empty() {
        set_id(&mut doc, Uuid::new_v4().to_string());
        docs.push(doc.clone());
        return doc;
    }

    match docs.iter_mut().find(|d| id_of(d) == id_of(&doc)) {
        Some(existing) => {
            *existing = doc.clone();
            doc
        }
        None => {
            docs.push(doc.clone());
            doc
        }
    }
}

/// In-memory customer collection
#[derive(Default)]
pub struct MemoryCustomerStore {
    docs: RwLock<Vec<Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut docs = self.docs.write();
        Ok(upsert(&mut docs, customer, |c| &c.id, |c, id| c.id = id))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.docs.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError> {
        Ok(self.docs.read().iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .find(|c| c.username == username)
            .cloned())
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Customer>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .find(|c| c.account_number == account_number)
            .cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut docs = self.docs.write();
        let before = docs.len();
        docs.retain(|c| c.id != id);
        Ok(docs.len() < before)
    }
}

/// In-memory bill collection
#[derive(Default)]
pub struct MemoryBillStore {
    docs: RwLock<Vec<Bill>>,
}

impl MemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn save(&self, bill: Bill) -> Result<Bill, AppError> {
        let mut docs = self.docs.write();
        Ok(upsert(&mut docs, bill, |b| &b.id, |b, id| b.id = id))
    }

    async fn find_all(&self) -> Result<Vec<Bill>, AppError> {
        Ok(self.docs.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Bill>, AppError> {
        Ok(self.docs.read().iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_bill_number(&self, bill_number: &str) -> Result<Option<Bill>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .find(|b| b.bill_number() == bill_number)
            .cloned())
    }

    async fn find_by_account_number(&self, account_number: &str) -> Result<Vec<Bill>, AppError> {
        let mut bills: Vec<Bill> = self
            .docs
            .read()
            .iter()
            .filter(|b| b.account_number == account_number)
            .cloned()
            .collect();
        // Newest first; undated bills sort last
        bills.sort_by(|a, b| b.bill_date.cmp(&a.bill_date));
        Ok(bills)
    }

    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|b| b.status == status)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        // No-op when the id is unknown, matching the historical behavior
        self.docs.write().retain(|b| b.id != id);
        Ok(())
    }

    async fn delete(&self, bill: &Bill) -> Result<(), AppError> {
        self.docs.write().retain(|b| b.id != bill.id);
        Ok(())
    }
}

/// In-memory book collection
#[derive(Default)]
pub struct MemoryBookStore {
    docs: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn save(&self, book: Book) -> Result<Book, AppError> {
        let mut docs = self.docs.write();
        Ok(upsert(&mut docs, book, |b| &b.id, |b, id| b.id = id))
    }

    async fn find_all(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.docs.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Book>, AppError> {
        Ok(self.docs.read().iter().find(|b| b.id == id).cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.docs.read().len())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut docs = self.docs.write();
        let before = docs.len();
        docs.retain(|b| b.id != id);
        Ok(docs.len() < before)
    }
}

/// In-memory order collection
#[derive(Default)]
pub struct MemoryOrderStore {
    docs: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn save(&self, order: Order) -> Result<Order, AppError> {
        let mut docs = self.docs.write();
        Ok(upsert(&mut docs, order, |o| &o.id, |o, id| o.id = id))
    }

    async fn find_all(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.docs.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, AppError> {
        Ok(self.docs.read().iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|o| o.email == email)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let mut docs = self.docs.write();
        let before = docs.len();
        docs.retain(|o| o.id != id);
        Ok(docs.len() < before)
    }
}

/// In-memory back-office user collection
#[derive(Default)]
pub struct MemoryUserStore {
    docs: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut docs = self.docs.write();
        Ok(upsert(&mut docs, user, |u| &u.id, |u, id| u.id = id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .docs
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.docs.read().len())
    }
}
