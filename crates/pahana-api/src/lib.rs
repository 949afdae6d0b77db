//! HTTP API layer for the Pahana Books backend
//!
//! Handlers and request DTOs for the `/api` surface. Success bodies follow
//! the `{"success": true, <payload key>: ...}` envelope; failures are
//! rendered by `AppError` as `{"success": false, "message": "..."}`.

pub mod dto;
pub mod handlers;

pub use handlers::configure_api;
