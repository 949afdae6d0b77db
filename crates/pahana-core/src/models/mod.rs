//! Domain models for the Pahana Books backend

pub mod bill;
pub mod book;
pub mod customer;
pub mod order;
pub mod user;

pub use bill::{Bill, BillItem, BillStatus};
pub use book::{Book, StockStatus};
pub use customer::Customer;
pub use order::{Order, OrderStatus};
pub use user::{User, UserRole};
