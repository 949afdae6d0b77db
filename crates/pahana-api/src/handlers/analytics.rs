//! Analytics handlers

use crate::dto::analytics::{RangeParams, ReportParams};
use actix_web::{web, HttpResponse};
use pahana_auth::AdminUser;
use pahana_core::AppError;
use pahana_services::AnalyticsEngine;
use serde_json::json;
use tracing::instrument;

/// GET /api/analytics/dashboard?startDate&endDate
#[instrument(skip(engine, _admin))]
pub async fn dashboard(
    engine: web::Data<AnalyticsEngine>,
    _admin: AdminUser,
    query: web::Query<RangeParams>,
) -> Result<HttpResponse, AppError> {
    let snapshot = engine.dashboard(query.start()?, query.end()?).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "analytics": snapshot,
    })))
}

/// GET /api/analytics/reports?startDate&endDate&reportType
#[instrument(skip(engine, _admin))]
pub async fn reports(
    engine: web::Data<AnalyticsEngine>,
    _admin: AdminUser,
    query: web::Query<ReportParams>,
) -> Result<HttpResponse, AppError> {
    let report = engine
        .report(query.start()?, query.end()?, query.report_type())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "reportData": report,
    })))
}

/// GET /api/analytics/export
#[instrument(skip(engine, _admin))]
pub async fn export(
    engine: web::Data<AnalyticsEngine>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let data = engine.export().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "exportData": data,
    })))
}

/// Register analytics routes under /analytics
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/dashboard", web::get().to(dashboard))
            .route("/reports", web::get().to(reports))
            .route("/export", web::get().to(export)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use pahana_auth::JwtService;
    use pahana_core::models::{Bill, UserRole};
    use pahana_core::traits::BillStore;
    use pahana_store::{MemoryBillStore, MemoryBookStore, MemoryCustomerStore, MemoryOrderStore};
    use std::sync::Arc;

    async fn engine_with_one_bill() -> AnalyticsEngine {
        let bills = Arc::new(MemoryBillStore::new());
        let mut bill = Bill::new("BILL1".to_string());
        bill.customer_name = "Jane".to_string();
        bill.bill_date = Some("2024-01-15T12:00:00Z".parse().unwrap());
        bill.total = 100.0;
        bills.save(bill).await.unwrap();

        AnalyticsEngine::new(
            bills,
            Arc::new(MemoryBookStore::new()),
            Arc::new(MemoryCustomerStore::new()),
            Arc::new(MemoryOrderStore::new()),
        )
    }

    #[actix_web::test]
    async fn test_dashboard_envelope_and_range() {
        let engine = engine_with_one_bill().await;
        let jwt = Arc::new(JwtService::new("test-secret-key", 3600));
        let token = jwt.create_token_for_user("admin", UserRole::Admin).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(engine))
                .app_data(web::Data::new(jwt))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/analytics/dashboard?startDate=2024-01-01&endDate=2024-01-31")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["analytics"]["totalRevenue"], 100.0);
        assert_eq!(body["analytics"]["totalCustomers"], 1);

        // Malformed dates are a 400, not silently today's range
        let req = test::TestRequest::get()
            .uri("/analytics/dashboard?startDate=01/01/2024")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_reports_and_export_envelopes() {
        let engine = engine_with_one_bill().await;
        let jwt = Arc::new(JwtService::new("test-secret-key", 3600));
        let token = jwt.create_token_for_user("admin", UserRole::Admin).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(engine))
                .app_data(web::Data::new(jwt))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/analytics/reports?reportType=bills")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["reportData"].as_array().unwrap().len(), 1);
        assert_eq!(body["reportData"][0]["billNumber"], "BILL1");

        let req = test::TestRequest::get()
            .uri("/analytics/export")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["exportData"]["summary"]["totalRevenue"], 100.0);
    }
}
