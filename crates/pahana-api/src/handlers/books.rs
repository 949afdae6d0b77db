//! Catalog handlers
//!
//! Browsing is public; every mutation requires an admin token.

use crate::dto::books::StockUpdateRequest;
use actix_web::{web, HttpResponse};
use pahana_auth::AdminUser;
use pahana_core::models::Book;
use pahana_core::AppError;
use pahana_services::{BookFilter, CatalogService};
use serde_json::json;
use tracing::instrument;

/// GET /api/books
#[instrument(skip(catalog))]
pub async fn list(
    catalog: web::Data<CatalogService>,
    query: web::Query<BookFilter>,
) -> Result<HttpResponse, AppError> {
    let page = catalog.list(&query).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "books": page.books,
        "total": page.total,
        "page": page.page,
        "size": page.size,
    })))
}

/// GET /api/books/{id}
#[instrument(skip(catalog))]
pub async fn by_id(
    catalog: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = catalog.find_by_id(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "book": book,
    })))
}

/// GET /api/books/categories
#[instrument(skip(catalog))]
pub async fn categories(catalog: web::Data<CatalogService>) -> Result<HttpResponse, AppError> {
    let categories = catalog.categories().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "categories": categories,
    })))
}

/// GET /api/books/statistics
#[instrument(skip(catalog, _admin))]
pub async fn statistics(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let statistics = catalog.statistics().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "statistics": statistics,
    })))
}

/// POST /api/books
#[instrument(skip(catalog, _admin, req))]
pub async fn add(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
    req: web::Json<Book>,
) -> Result<HttpResponse, AppError> {
    let book = catalog.add(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "book": book,
    })))
}

/// PUT /api/books/{id}
#[instrument(skip(catalog, _admin, req))]
pub async fn update(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<Book>,
) -> Result<HttpResponse, AppError> {
    let book = catalog.update(&path.into_inner(), req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "book": book,
    })))
}

/// PUT /api/books/{id}/stock
#[instrument(skip(catalog, _admin, req))]
pub async fn update_stock(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<StockUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let status = req.stock_status()?;
    let book = catalog
        .update_stock(&path.into_inner(), req.stock_quantity, status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "book": book,
    })))
}

/// PUT /api/books/{id}/archive
#[instrument(skip(catalog, _admin))]
pub async fn archive(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = catalog.archive(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "book": book,
    })))
}

/// DELETE /api/books/{id}
#[instrument(skip(catalog, _admin))]
pub async fn delete(
    catalog: web::Data<CatalogService>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    catalog.delete(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Book deleted",
    })))
}

/// Register catalog routes under /books
///
/// Fixed segments are registered before the `{id}` catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .route("", web::get().to(list))
            .route("", web::post().to(add))
            .route("/categories", web::get().to(categories))
            .route("/statistics", web::get().to(statistics))
            .route("/{id}", web::get().to(by_id))
            .route("/{id}", web::put().to(update))
            .route("/{id}/stock", web::put().to(update_stock))
            .route("/{id}/archive", web::put().to(archive))
            .route("/{id}", web::delete().to(delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use pahana_auth::JwtService;
    use pahana_core::models::UserRole;
    use pahana_store::MemoryBookStore;
    use std::sync::Arc;

    async fn seeded_catalog() -> CatalogService {
        let catalog = CatalogService::new(Arc::new(MemoryBookStore::new()));
        let mut book = Book::default();
        book.title = "Gatsby".to_string();
        book.author = "Fitzgerald".to_string();
        book.category = Some("Novels".to_string());
        book.price = 15.99;
        book.set_stock_quantity(25);
        catalog.add(book).await.unwrap();
        catalog
    }

    #[actix_web::test]
    async fn test_public_listing_and_guarded_mutation() {
        let catalog = seeded_catalog().await;
        let jwt = Arc::new(JwtService::new("test-secret-key", 3600));
        let token = jwt.create_token_for_user("admin", UserRole::Admin).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(catalog))
                .app_data(web::Data::new(jwt))
                .configure(configure),
        )
        .await;

        // Listing needs no token
        let req = test::TestRequest::get().uri("/books").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 1);
        let id = body["books"][0]["id"].as_str().unwrap().to_string();

        // Mutation without a token is rejected
        let req = test::TestRequest::put()
            .uri(&format!("/books/{}/stock", id))
            .set_json(json!({"stockQuantity": 3}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // With an admin token the stock status is re-derived
        let req = test::TestRequest::put()
            .uri(&format!("/books/{}/stock", id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"stockQuantity": 3}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["book"]["status"], "LOW_STOCK");
    }

    #[actix_web::test]
    async fn test_categories_endpoint() {
        let catalog = seeded_catalog().await;
        let jwt = Arc::new(JwtService::new("test-secret-key", 3600));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(catalog))
                .app_data(web::Data::new(jwt))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/books/categories").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["categories"], json!(["Novels"]));
    }
}
