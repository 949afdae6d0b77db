//! Pahana Books Backend Server
//!
//! Bookstore management backend: catalog, customer accounts, orders,
//! admin-driven billing and analytics, served as JSON over HTTP.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use pahana_api::configure_api;
use pahana_auth::{JwtService, PasswordService};
use pahana_core::{AppConfig, CounterIdGenerator, IdGenerator};
use pahana_services::{
    AdminAuth, AnalyticsEngine, BillingEngine, CatalogService, CustomerDirectory, OrderDesk,
};
use pahana_store::{
    seed, MemoryBillStore, MemoryBookStore, MemoryCustomerStore, MemoryOrderStore, MemoryUserStore,
};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pahana_backend={},pahana_api={},pahana_services={},pahana_store={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Pahana Books Backend v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Auth services
    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_secs,
    ));
    let password_service = PasswordService::new();

    info!(
        "JWT service configured with {} second token expiration",
        config.auth.jwt_expiration_secs
    );

    // In-memory document collections
    let customers = Arc::new(MemoryCustomerStore::new());
    let bills = Arc::new(MemoryBillStore::new());
    let books = Arc::new(MemoryBookStore::new());
    let orders = Arc::new(MemoryOrderStore::new());
    let users = Arc::new(MemoryUserStore::new());

    // First-run seeding: default admin and sample catalog
    let admin_hash = password_service
        .hash_password(&config.auth.admin_password)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    seed::seed_admin(users.as_ref(), admin_hash)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    seed::seed_books(books.as_ref())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // Business identifier generation, shared by billing and registration
    let ids: Arc<dyn IdGenerator> = Arc::new(CounterIdGenerator::new());

    // Services
    let billing = BillingEngine::new(customers.clone(), bills.clone(), ids.clone());
    let analytics = AnalyticsEngine::new(
        bills.clone(),
        books.clone(),
        customers.clone(),
        orders.clone(),
    );
    let catalog = CatalogService::new(books.clone());
    let order_desk = OrderDesk::new(orders.clone(), books.clone());
    let directory = CustomerDirectory::new(customers.clone(), ids, password_service.clone());
    let admin_auth = AdminAuth::new(users.clone(), password_service);

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.cors.allowed_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::COOKIE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::Data::new(billing.clone()))
            .app_data(web::Data::new(analytics.clone()))
            .app_data(web::Data::new(catalog.clone()))
            .app_data(web::Data::new(order_desk.clone()))
            .app_data(web::Data::new(directory.clone()))
            .app_data(web::Data::new(admin_auth.clone()))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "success": false,
                        "message": error_message
                    })),
                )
                .into()
            }))
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_api)
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
