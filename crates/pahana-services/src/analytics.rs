//! Analytics engine
//!
//! Read-only aggregation over the bill, book, customer and order
//! collections. Every operation snapshots the collections, folds locally and
//! returns an owned result; nothing here mutates shared state.
//!
//! Date filtering is calendar-based: only the date component of a timestamp
//! is compared, and documents without a date are excluded from ranged
//! aggregates.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use pahana_core::models::{Bill, BillStatus};
use pahana_core::traits::{BillStore, BookStore, CustomerStore, OrderStore};
use pahana_core::AppError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;

/// Days of history included when no start date is given
const DEFAULT_RANGE_DAYS: i64 = 30;

/// Number of entries in the recent-bills projection
const RECENT_BILLS: usize = 6;

/// Number of entries in the top-books ranking
const TOP_BOOKS: usize = 5;

/// Round half-up to two decimal places
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Dashboard aggregate, one JSON object per request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_books: usize,
    pub last_week_revenue: f64,
    pub revenue_change: f64,
    pub top_books: Vec<TopBook>,
    pub category_performance: HashMap<String, i32>,
    pub payment_method_revenue: HashMap<String, f64>,
    pub recent_bills: Vec<RecentBill>,
    pub sales_trend: BTreeMap<String, f64>,
    pub stock_status: StockBuckets,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBook {
    pub title: String,
    pub quantity: i32,
}

/// Reduced bill projection for the dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBill {
    pub bill_number: String,
    pub customer_name: String,
    pub total: f64,
    pub bill_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub status: BillStatus,
}

/// Inventory buckets over the full (unfiltered) book set
///
/// The low-stock cutoff here is 10, not the 5 used for a book's own status
/// field. The two thresholds serve different screens and are independent.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockBuckets {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// Report flavor selected by the `reportType` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    #[default]
    Bills,
    Books,
    Customers,
}

impl ReportType {
    /// Parse from string (case-insensitive); unknown values fall back to bills
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "books" => ReportType::Books,
            "customers" => ReportType::Customers,
            _ => ReportType::Bills,
        }
    }
}

/// Flat report rows, shape depending on the requested type
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Bills(Vec<BillReportRow>),
    Books(Vec<BookReportRow>),
    Customers(Vec<CustomerReportRow>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReportRow {
    pub date: Option<DateTime<Utc>>,
    pub bill_number: String,
    pub customer_name: String,
    pub items: usize,
    pub total_amount: f64,
    pub payment_method: Option<String>,
    pub status: BillStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReportRow {
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub rating: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReportRow {
    pub account_number: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_date: DateTime<Utc>,
}

/// Full data dump with a summary block; never date-filtered
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub bills: Vec<pahana_core::models::Bill>,
    pub books: Vec<pahana_core::models::Book>,
    pub customers: Vec<pahana_core::models::Customer>,
    pub orders: Vec<pahana_core::models::Order>,
    pub summary: ExportSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_books: usize,
    pub generated_at: DateTime<Utc>,
}

/// Analytics engine over the four collections
#[derive(Clone)]
pub struct AnalyticsEngine {
    bills: Arc<dyn BillStore>,
    books: Arc<dyn BookStore>,
    customers: Arc<dyn CustomerStore>,
    orders: Arc<dyn OrderStore>,
}

fn in_range(day: Option<NaiveDate>, start: NaiveDate, end: NaiveDate) -> bool {
    matches!(day, Some(d) if d >= start && d <= end)
}

impl AnalyticsEngine {
    pub fn new(
        bills: Arc<dyn BillStore>,
        books: Arc<dyn BookStore>,
        customers: Arc<dyn CustomerStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            bills,
            books,
            customers,
            orders,
        }
    }

    /// Build the dashboard aggregate for a date range
    ///
    /// `end` defaults to today, `start` to thirty days before `end`. Both
    /// bounds are inclusive on the date component.
    #[instrument(skip(self))]
    pub async fn dashboard(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DashboardSnapshot, AppError> {
        let end = end.unwrap_or_else(|| Utc::now().date_naive());
        let start = start.unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));

        let all_bills = self.bills.find_all().await?;
        let all_books = self.books.find_all().await?;
        let all_orders = self.orders.find_all().await?;

        let ranged_bills: Vec<&Bill> = all_bills
            .iter()
            .filter(|b| in_range(b.bill_day(), start, end))
            .collect();

        let total_revenue: f64 = ranged_bills.iter().map(|b| b.total).sum();

        // Week-over-week comparison over the ranged bills, so the week
        // windows are implicitly intersected with the requested range. The
        // last-week window is inclusive on both ends while the previous-week
        // window is exclusive on both; the boundary asymmetry is part of the
        // established numbers and must not be "fixed".
        let week_ago = end - Duration::days(7);
        let two_weeks_ago = end - Duration::days(14);

        let last_week_revenue: f64 = ranged_bills
            .iter()
            .filter(|b| in_range(b.bill_day(), week_ago, end))
            .map(|b| b.total)
            .sum();

        let previous_week_revenue: f64 = ranged_bills
            .iter()
            .filter(|b| matches!(b.bill_day(), Some(d) if d > two_weeks_ago && d < week_ago))
            .map(|b| b.total)
            .sum();

        let revenue_change = if previous_week_revenue <= 0.0 {
            0.0
        } else {
            round2((last_week_revenue - previous_week_revenue) / previous_week_revenue * 100.0)
        };

        // Top books by quantity over ranged orders; ties keep first-seen
        // order (stable sort over encounter order).
        let ranged_orders: Vec<_> = all_orders
            .iter()
            .filter(|o| in_range(o.order_day(), start, end))
            .collect();

        let mut title_totals: Vec<(String, i32)> = Vec::new();
        let mut title_index: HashMap<String, usize> = HashMap::new();
        for order in &ranged_orders {
            match title_index.get(&order.book_title) {
                Some(&i) => title_totals[i].1 += order.quantity,
                None => {
                    title_index.insert(order.book_title.clone(), title_totals.len());
                    title_totals.push((order.book_title.clone(), order.quantity));
                }
            }
        }
        title_totals.sort_by(|a, b| b.1.cmp(&a.1));
        let top_books = title_totals
            .into_iter()
            .take(TOP_BOOKS)
            .map(|(title, quantity)| TopBook { title, quantity })
            .collect();

        // Category performance: order quantities attributed to the book's
        // category, "Uncategorized" when the book is unknown.
        let book_categories: HashMap<&str, &str> = all_books
            .iter()
            .map(|b| (b.id.as_str(), b.category_or_default()))
            .collect();

        let mut category_performance: HashMap<String, i32> = HashMap::new();
        for order in &ranged_orders {
            let category = book_categories
                .get(order.book_id.as_str())
                .copied()
                .unwrap_or("Uncategorized");
            *category_performance.entry(category.to_string()).or_insert(0) += order.quantity;
        }

        let mut payment_method_revenue: HashMap<String, f64> = HashMap::new();
        for bill in &ranged_bills {
            let method = bill
                .payment_method
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| "UNKNOWN".to_string());
            *payment_method_revenue.entry(method).or_insert(0.0) += bill.total;
        }

        // Recent bills, newest first; undated bills sort last
        let mut by_date: Vec<&&Bill> = ranged_bills.iter().collect();
        by_date.sort_by(|a, b| b.bill_date.cmp(&a.bill_date));
        let recent_bills = by_date
            .into_iter()
            .take(RECENT_BILLS)
            .map(|b| RecentBill {
                bill_number: b.bill_number().to_string(),
                customer_name: b.customer_name.clone(),
                total: b.total,
                bill_date: b.bill_date,
                payment_method: b.payment_method.clone(),
                status: b.status,
            })
            .collect();

        // One zero-initialized trend point per calendar day in range
        let mut sales_trend: BTreeMap<String, f64> = BTreeMap::new();
        let mut day = start;
        while day <= end {
            sales_trend.insert(day.format("%Y-%m-%d").to_string(), 0.0);
            day += Duration::days(1);
        }
        for bill in &ranged_bills {
            if let Some(d) = bill.bill_day() {
                if let Some(total) = sales_trend.get_mut(&d.format("%Y-%m-%d").to_string()) {
                    *total += bill.total;
                }
            }
        }

        let stock_status = StockBuckets {
            in_stock: all_books.iter().filter(|b| b.stock_quantity() > 10).count(),
            low_stock: all_books
                .iter()
                .filter(|b| b.stock_quantity() > 0 && b.stock_quantity() <= 10)
                .count(),
            out_of_stock: all_books.iter().filter(|b| b.stock_quantity() <= 0).count(),
        };

        // Distinct non-empty customer names across ranged bills
        let total_customers = ranged_bills
            .iter()
            .map(|b| b.customer_name.trim())
            .filter(|n| !n.is_empty())
            .collect::<HashSet<_>>()
            .len();

        Ok(DashboardSnapshot {
            total_revenue,
            total_orders: ranged_orders.len(),
            total_customers,
            total_books: all_books.len(),
            last_week_revenue,
            revenue_change,
            top_books,
            category_performance,
            payment_method_revenue,
            recent_bills,
            sales_trend,
            stock_status,
        })
    }

    /// Flat report rows for one entity type
    ///
    /// The date filter applies to bill reports only, and only when both
    /// bounds are supplied.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        report_type: Option<ReportType>,
    ) -> Result<Report, AppError> {
        match report_type.unwrap_or_default() {
            ReportType::Bills => {
                let bills = self.bills.find_all().await?;
                let rows = bills
                    .into_iter()
                    .filter(|b| match (start, end) {
                        (Some(s), Some(e)) => in_range(b.bill_day(), s, e),
                        _ => true,
                    })
                    .map(|b| BillReportRow {
                        date: b.bill_date,
                        bill_number: b.bill_number().to_string(),
                        customer_name: b.customer_name.clone(),
                        items: b.items.len(),
                        total_amount: b.total,
                        payment_method: b.payment_method.clone(),
                        status: b.status,
                    })
                    .collect();
                Ok(Report::Bills(rows))
            }
            ReportType::Books => {
                let books = self.books.find_all().await?;
                let rows = books
                    .into_iter()
                    .map(|b| BookReportRow {
                        title: b.title.clone(),
                        author: b.author.clone(),
                        category: b.category_or_default().to_string(),
                        price: b.price,
                        stock: b.stock_quantity(),
                        rating: b.rating,
                    })
                    .collect();
                Ok(Report::Books(rows))
            }
            ReportType::Customers => {
                let customers = self.customers.find_all().await?;
                let rows = customers
                    .into_iter()
                    .map(|c| CustomerReportRow {
                        account_number: c.account_number,
                        name: c.name,
                        email: c.email,
                        phone: c.phone,
                        registration_date: c.created_at,
                    })
                    .collect();
                Ok(Report::Customers(rows))
            }
        }
    }

    /// Full export of all four collections with a summary block
    ///
    /// Unlike the dashboard, the export never filters by date.
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<ExportData, AppError> {
        let bills = self.bills.find_all().await?;
        let books = self.books.find_all().await?;
        let customers = self.customers.find_all().await?;
        let orders = self.orders.find_all().await?;

        let summary = ExportSummary {
            total_revenue: bills.iter().map(|b| b.total).sum(),
            total_orders: orders.len(),
            total_customers: customers.len(),
            total_books: books.len(),
            generated_at: Utc::now(),
        };

        Ok(ExportData {
            bills,
            books,
            customers,
            orders,
            summary,
        })
    }
}
