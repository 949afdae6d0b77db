//! Customer order model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl OrderStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(OrderStatus::Pending),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// Order entity
///
/// Deserialization fills missing fields from `Default`; the storefront only
/// sends the fields it knows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: String,

    pub book_id: String,
    pub book_title: String,

    // Customer information
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub customer_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,

    // Order details
    pub quantity: i32,
    pub total_price: f64,
    pub payment_method: Option<String>,

    // Shipping address
    pub company: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,

    pub order_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
}

impl Order {
    /// Date-only component of the order date
    pub fn order_day(&self) -> Option<chrono::NaiveDate> {
        self.order_date.map(|d| d.date_naive())
    }
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: String::new(),
            book_id: String::new(),
            book_title: String::new(),
            first_name: None,
            last_name: None,
            customer_name: None,
            email: String::new(),
            phone: None,
            quantity: 0,
            total_price: 0.0,
            payment_method: None,
            company: None,
            street_address: None,
            city: None,
            postal_code: None,
            country: None,
            state: None,
            order_date: None,
            status: OrderStatus::Pending,
        }
    }
}
