//! Request and query DTOs
//!
//! Typed request bodies where the wire contract is typed; the billing
//! generation payload stays an untyped JSON object by contract and is
//! handled in the billing handlers directly.

pub mod analytics;
pub mod auth;
pub mod billing;
pub mod books;
pub mod orders;

pub use analytics::{RangeParams, ReportParams};
pub use auth::{LoginRequest, RegisterRequest};
pub use billing::{LegacyBillRequest, SearchParams, UpdateStatusRequest};
pub use books::StockUpdateRequest;
pub use orders::OrderStatusRequest;
