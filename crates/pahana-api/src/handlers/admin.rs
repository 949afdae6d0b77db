//! Back-office handlers: admin login and customer administration

use crate::dto::auth::LoginRequest;
use actix_web::{web, HttpResponse};
use pahana_auth::{AdminUser, JwtService};
use pahana_core::models::Customer;
use pahana_core::AppError;
use pahana_services::{AdminAuth, CustomerDirectory, CustomerUpdate};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

/// POST /api/admin/login
#[instrument(skip(admin_auth, jwt_service, req))]
pub async fn login(
    admin_auth: web::Data<AdminAuth>,
    jwt_service: web::Data<Arc<JwtService>>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;

    let user = admin_auth
        .authenticate(req.username.trim(), &req.password)
        .await?;

    let token = jwt_service.create_token_for_user(&user.username, user.role)?;

    info!(username = %user.username, "Admin login");

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "token": token,
        "admin": user,
        "message": "Login successful",
    })))
}

/// GET /api/admin/customers
#[instrument(skip(directory, _admin))]
pub async fn list_customers(
    directory: web::Data<CustomerDirectory>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let customers = directory.list().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customers": customers,
    })))
}

/// POST /api/admin/customers
#[instrument(skip(directory, _admin, req))]
pub async fn add_customer(
    directory: web::Data<CustomerDirectory>,
    _admin: AdminUser,
    req: web::Json<Customer>,
) -> Result<HttpResponse, AppError> {
    let customer = directory.admin_add(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// PUT /api/admin/customers/{id}
#[instrument(skip(directory, _admin, req))]
pub async fn update_customer(
    directory: web::Data<CustomerDirectory>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<CustomerUpdate>,
) -> Result<HttpResponse, AppError> {
    let customer = directory
        .update_by_id(&path.into_inner(), req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// DELETE /api/admin/customers/{id}
#[instrument(skip(directory, _admin))]
pub async fn delete_customer(
    directory: web::Data<CustomerDirectory>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    directory.delete(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Customer deleted",
    })))
}

/// Register back-office routes under /admin
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/customers", web::get().to(list_customers))
            .route("/customers", web::post().to(add_customer))
            .route("/customers/{id}", web::put().to(update_customer))
            .route("/customers/{id}", web::delete().to(delete_customer)),
    );
}
