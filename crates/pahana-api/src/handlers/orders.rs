//! Order handlers
//!
//! Placement and the by-email lookup are public (the storefront checkout is
//! unauthenticated); management is admin-only.

use crate::dto::orders::OrderStatusRequest;
use actix_web::{web, HttpResponse};
use pahana_auth::AdminUser;
use pahana_core::models::Order;
use pahana_core::AppError;
use pahana_services::{OrderDesk, OrderUpdate};
use serde_json::json;
use tracing::instrument;

/// POST /api/orders
#[instrument(skip(desk, req))]
pub async fn place(
    desk: web::Data<OrderDesk>,
    req: web::Json<Order>,
) -> Result<HttpResponse, AppError> {
    let order = desk.place_order(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "order": order,
    })))
}

/// GET /api/orders
#[instrument(skip(desk, _admin))]
pub async fn list(
    desk: web::Data<OrderDesk>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let orders = desk.list().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": orders,
    })))
}

/// GET /api/orders/{id}
#[instrument(skip(desk, _admin))]
pub async fn by_id(
    desk: web::Data<OrderDesk>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = desk.find_by_id(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "order": order,
    })))
}

/// PUT /api/orders/{id}/status
#[instrument(skip(desk, _admin, req))]
pub async fn update_status(
    desk: web::Data<OrderDesk>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<OrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let status = req.order_status()?;
    let order = desk.update_status(&path.into_inner(), status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "order": order,
    })))
}

/// PUT /api/orders/{id}
#[instrument(skip(desk, _admin, req))]
pub async fn update(
    desk: web::Data<OrderDesk>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<OrderUpdate>,
) -> Result<HttpResponse, AppError> {
    let order = desk.update(&path.into_inner(), req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "order": order,
    })))
}

/// DELETE /api/orders/{id}
#[instrument(skip(desk, _admin))]
pub async fn delete(
    desk: web::Data<OrderDesk>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    desk.delete(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order deleted",
    })))
}

/// GET /api/orders/by-email/{email}
#[instrument(skip(desk))]
pub async fn by_email(
    desk: web::Data<OrderDesk>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let orders = desk.orders_by_email(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "orders": orders,
    })))
}

/// Register order routes under /orders
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(place))
            .route("", web::get().to(list))
            .route("/by-email/{email}", web::get().to(by_email))
            .route("/{id}", web::get().to(by_id))
            .route("/{id}", web::put().to(update))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}", web::delete().to(delete)),
    );
}
