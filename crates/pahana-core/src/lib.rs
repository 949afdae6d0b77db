//! Pahana Books Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Pahana Books backend. It includes:
//!
//! - Domain models (Bill, Book, Order, Customer, etc.)
//! - Store collaborator traits
//! - Business identifier generation
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;
pub use ids::{CounterIdGenerator, IdGenerator};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
