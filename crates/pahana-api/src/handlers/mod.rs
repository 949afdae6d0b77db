//! HTTP handlers, one module per route scope

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod billing;
pub mod books;
pub mod orders;

use actix_web::{web, HttpResponse};
use serde_json::json;

/// GET /api/health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "status": "ok",
    }))
}

/// Register the full API surface under /api
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .configure(auth::configure)
            .configure(admin::configure)
            .configure(books::configure)
            .configure(orders::configure)
            .configure(billing::configure)
            .configure(analytics::configure),
    );
}
