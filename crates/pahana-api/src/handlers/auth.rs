//! Customer authentication and profile handlers

use crate::dto::auth::{LoginRequest, RegisterRequest};
use actix_web::{cookie::Cookie, web, HttpResponse};
use pahana_auth::{AuthenticatedUser, JwtService};
use pahana_core::models::UserRole;
use pahana_core::AppError;
use pahana_services::{CustomerDirectory, ProfileUpdate};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// POST /api/customers/register
#[instrument(skip(directory, req))]
pub async fn register(
    directory: web::Data<CustomerDirectory>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Registration validation failed: {}", e);
        AppError::from(e)
    })?;

    let customer = directory.register(req.into_inner().into()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// POST /api/customers/login
#[instrument(skip(directory, jwt_service, req))]
pub async fn login(
    directory: web::Data<CustomerDirectory>,
    jwt_service: web::Data<Arc<JwtService>>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;

    let customer = directory
        .authenticate(req.username.trim(), &req.password)
        .await?;

    let token = jwt_service.create_token_for_user(&customer.username, UserRole::Customer)?;

    info!(username = %customer.username, "Customer login");

    let cookie = Cookie::build("token", token.clone())
        .path("/")
        .http_only(true)
        .max_age(actix_web::cookie::time::Duration::seconds(
            jwt_service.expiration_secs(),
        ))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "success": true,
        "token": token,
        "customer": customer,
    })))
}

/// GET /api/customers/profile
#[instrument(skip(directory))]
pub async fn profile(
    directory: web::Data<CustomerDirectory>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let customer = directory.find_by_username(&user.username).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// PUT /api/customers/profile
#[instrument(skip(directory, req))]
pub async fn update_profile(
    directory: web::Data<CustomerDirectory>,
    user: AuthenticatedUser,
    req: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let customer = directory
        .update_profile(&user.username, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// Register customer-facing auth routes under /customers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/profile", web::get().to(profile))
            .route("/profile", web::put().to(update_profile)),
    );
}
