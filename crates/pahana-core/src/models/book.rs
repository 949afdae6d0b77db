//! Book catalog model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status derived from the stock quantity
///
/// Derivation thresholds here (≤ 0 out, ≤ 5 low) differ on purpose from the
/// analytics stock buckets, which cut low stock at 10. The two rules serve
/// different consumers and are kept independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "IN_STOCK"),
            StockStatus::LowStock => write!(f, "LOW_STOCK"),
            StockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
        }
    }
}

impl StockStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "IN_STOCK" => Some(StockStatus::InStock),
            "LOW_STOCK" => Some(StockStatus::LowStock),
            "OUT_OF_STOCK" => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }

    /// Status implied by a stock quantity
    pub fn for_quantity(quantity: i32) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= 5 {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Book entity
///
/// Deserialization fills missing fields from `Default`, so partial admin
/// payloads are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: String,

    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,

    pub category: Option<String>,
    pub isbn: Option<String>,
    pub language: String,
    pub published_year: i32,
    pub format: String,

    stock_quantity: i32,
    status: StockStatus,

    pub rating: f64,
    pub rating_count: i32,
    pub publisher: String,
    pub pages: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived: bool,
}

impl Book {
    pub fn stock_quantity(&self) -> i32 {
        self.stock_quantity
    }

    /// Set the stock quantity and re-derive the status
    pub fn set_stock_quantity(&mut self, quantity: i32) {
        self.stock_quantity = quantity;
        self.status = StockStatus::for_quantity(quantity);
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Explicit status override (admin stock screens set this directly)
    pub fn set_status(&mut self, status: StockStatus) {
        self.status = status;
    }

    /// Category with the fallback used throughout analytics
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

impl Default for Book {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title: String::new(),
            author: String::new(),
            description: None,
            image_url: None,
            price: 0.0,
            category: None,
            isbn: None,
            language: "English".to_string(),
            published_year: 0,
            format: "Paperback".to_string(),
            stock_quantity: 10,
            status: StockStatus::InStock,
            rating: 0.0,
            rating_count: 0,
            publisher: "Pahana Books".to_string(),
            pages: 0,
            created_at: now,
            updated_at: now,
            archived: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_derivation_thresholds() {
        assert_eq!(StockStatus::for_quantity(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_quantity(-3), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_quantity(1), StockStatus::LowStock);
        assert_eq!(StockStatus::for_quantity(5), StockStatus::LowStock);
        assert_eq!(StockStatus::for_quantity(6), StockStatus::InStock);
    }

    #[test]
    fn test_set_stock_quantity_rederives_status() {
        let mut book = Book::default();
        assert_eq!(book.status(), StockStatus::InStock);

        book.set_stock_quantity(3);
        assert_eq!(book.status(), StockStatus::LowStock);

        book.set_stock_quantity(0);
        assert_eq!(book.status(), StockStatus::OutOfStock);

        book.set_stock_quantity(50);
        assert_eq!(book.status(), StockStatus::InStock);
    }

    #[test]
    fn test_category_fallback() {
        let mut book = Book::default();
        assert_eq!(book.category_or_default(), "Uncategorized");
        book.category = Some("Novels".to_string());
        assert_eq!(book.category_or_default(), "Novels");
    }
}
