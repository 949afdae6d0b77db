//! In-memory document store for the Pahana Books backend
//!
//! Provides the concrete collections behind the `pahana-core` store traits,
//! plus first-run seeding of the catalog and the default admin user.

pub mod memory;
pub mod seed;

pub use memory::{
    MemoryBillStore, MemoryBookStore, MemoryCustomerStore, MemoryOrderStore, MemoryUserStore,
};
