//! Business services for the Pahana Books backend
//!
//! The two core engines (billing, analytics) plus the catalog, order,
//! customer and admin-auth services. Every service holds its collaborators
//! as `Arc<dyn Trait>` store contracts from `pahana-core`, so the concrete
//! persistence is swappable and tests run against the in-memory collections.

pub mod admin;
pub mod analytics;
pub mod billing;
pub mod catalog;
pub mod coerce;
pub mod customers;
pub mod orders;

pub use admin::AdminAuth;
pub use analytics::{AnalyticsEngine, DashboardSnapshot, Report, ReportType};
pub use billing::BillingEngine;
pub use catalog::{BookFilter, CatalogService};
pub use customers::{CustomerDirectory, CustomerUpdate, ProfileUpdate, Registration};
pub use orders::{OrderDesk, OrderUpdate};
