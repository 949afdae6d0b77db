//! Billing handlers
//!
//! The generation endpoint accepts an untyped JSON object by contract; all
//! numeric coercion happens inside the billing engine.

use crate::dto::billing::{LegacyBillRequest, SearchParams, UpdateStatusRequest};
use actix_web::{web, HttpResponse};
use pahana_auth::AdminUser;
use pahana_core::models::BillStatus;
use pahana_core::AppError;
use pahana_services::{BillingEngine, CustomerDirectory};
use serde_json::{json, Value};
use tracing::instrument;
use validator::Validate;

/// GET /api/billing/customer/{accountNumber}
#[instrument(skip(directory, _admin))]
pub async fn customer_by_account(
    directory: web::Data<CustomerDirectory>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer = directory.find_by_account_number(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "customer": customer,
    })))
}

/// POST /api/billing/generate
#[instrument(skip(engine, _admin, payload))]
pub async fn generate(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let payload = payload
        .into_inner()
        .as_object()
        .cloned()
        .ok_or_else(|| AppError::Validation("request body must be a JSON object".to_string()))?;

    let bill = engine.generate_itemized_bill(&payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bill": bill,
    })))
}

/// POST /api/billing/generate-legacy
#[instrument(skip(engine, _admin, req))]
pub async fn generate_legacy(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    req: web::Json<LegacyBillRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;

    let bill = engine
        .generate_legacy_bill(&req.account_number, req.units_consumed, req.rate_per_unit)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bill": bill,
    })))
}

/// GET /api/billing/all
#[instrument(skip(engine, _admin))]
pub async fn all_bills(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let bills = engine.all_bills().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bills": bills,
    })))
}

/// GET /api/billing/history/{accountNumber}
#[instrument(skip(engine, _admin))]
pub async fn history(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bills = engine.history(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bills": bills,
    })))
}

/// GET /api/billing/bill/{billNumber}
#[instrument(skip(engine, _admin))]
pub async fn bill_by_number(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bill = engine.bill_by_number(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bill": bill,
    })))
}

/// PUT /api/billing/status/{billNumber}
#[instrument(skip(engine, _admin, req))]
pub async fn update_status(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let status = req.bill_status()?;
    let bill = engine
        .update_status_by_bill_number(&path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bill": bill,
    })))
}

/// DELETE /api/billing/bill/{billNumber}
#[instrument(skip(engine, _admin))]
pub async fn delete_bill(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    engine.delete_by_bill_number(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Bill deleted",
    })))
}

/// GET /api/billing/search?searchTerm=...
#[instrument(skip(engine, _admin))]
pub async fn search(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let bills = engine.search(&query.search_term).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bills": bills,
    })))
}

/// GET /api/billing/status/{status}
#[instrument(skip(engine, _admin))]
pub async fn bills_by_status(
    engine: web::Data<BillingEngine>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let status = BillStatus::from_str(&raw)
        .ok_or_else(|| AppError::Validation(format!("unknown bill status: {}", raw)))?;

    let bills = engine.bills_by_status(status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "bills": bills,
    })))
}

/// Register billing routes under /billing
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/billing")
            .route("/customer/{account_number}", web::get().to(customer_by_account))
            .route("/generate", web::post().to(generate))
            .route("/generate-legacy", web::post().to(generate_legacy))
            .route("/all", web::get().to(all_bills))
            .route("/history/{account_number}", web::get().to(history))
            .route("/bill/{bill_number}", web::get().to(bill_by_number))
            .route("/bill/{bill_number}", web::delete().to(delete_bill))
            .route("/search", web::get().to(search))
            .route("/status/{bill_number}", web::put().to(update_status))
            .route("/status/{status}", web::get().to(bills_by_status)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use pahana_auth::{JwtService, PasswordService};
    use pahana_core::models::{Customer, UserRole};
    use pahana_core::traits::CustomerStore;
    use pahana_core::CounterIdGenerator;
    use pahana_store::{MemoryBillStore, MemoryCustomerStore};
    use std::sync::Arc;

    struct TestCtx {
        engine: BillingEngine,
        directory: CustomerDirectory,
        jwt: Arc<JwtService>,
        admin_token: String,
    }

    async fn ctx() -> TestCtx {
        let customers = Arc::new(MemoryCustomerStore::new());
        customers
            .save(Customer {
                account_number: "ACC100".to_string(),
                username: "jane".to_string(),
                name: "Jane".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let ids = Arc::new(CounterIdGenerator::with_seed(500));
        let engine = BillingEngine::new(
            customers.clone(),
            Arc::new(MemoryBillStore::new()),
            ids.clone(),
        );
        let directory = CustomerDirectory::new(customers, ids, PasswordService::new());
        let jwt = Arc::new(JwtService::new("test-secret-key", 3600));
        let admin_token = jwt.create_token_for_user("admin", UserRole::Admin).unwrap();

        TestCtx {
            engine,
            directory,
            jwt,
            admin_token,
        }
    }

    macro_rules! test_app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ctx.engine.clone()))
                    .app_data(web::Data::new($ctx.directory.clone()))
                    .app_data(web::Data::new($ctx.jwt.clone()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_generate_bill_end_to_end() {
        let ctx = ctx().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/billing/generate")
            .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token)))
            .set_json(json!({
                "customerAccountNumber": "ACC100",
                "items": [{"bookId": "b1", "title": "Gatsby", "quantity": "3", "price": 9.5}],
                "total": 28.5
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["bill"]["items"][0]["subtotal"], 28.5);
        assert_eq!(body["bill"]["customerName"], "Jane");
    }

    #[actix_web::test]
    async fn test_generate_requires_admin() {
        let ctx = ctx().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/billing/generate")
            .set_json(json!({"customerAccountNumber": "ACC100"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_unknown_customer_is_404_with_failure_envelope() {
        let ctx = ctx().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/billing/generate")
            .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token)))
            .set_json(json!({
                "customerAccountNumber": "ACC999",
                "items": [{"quantity": 1}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("ACC999"));
    }

    #[actix_web::test]
    async fn test_status_update_and_search() {
        let ctx = ctx().await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/billing/generate")
            .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token)))
            .set_json(json!({
                "customerAccountNumber": "ACC100",
                "items": [{"bookId": "b1", "title": "T", "quantity": 1, "price": 5.0}]
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let number = body["bill"]["billNumber"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/billing/status/{}", number))
            .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token)))
            .set_json(json!({"status": "PAID"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["bill"]["status"], "PAID");

        let req = test::TestRequest::get()
            .uri("/billing/search?searchTerm=acc100")
            .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["bills"].as_array().unwrap().len(), 1);
    }
}
