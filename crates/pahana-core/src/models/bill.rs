//! Bill and bill item models
//!
//! A bill is an invoice tied to a customer account, with itemized lines and
//! financial totals. Line subtotals are derived values: they are recomputed
//! whenever quantity or unit price changes and are never trusted from input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bill lifecycle status
///
/// There is intentionally no transition graph: an authorized caller may
/// overwrite any status with any other at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    #[default]
    Pending,
    Saved,
    Paid,
    Failed,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillStatus::Pending => write!(f, "PENDING"),
            BillStatus::Saved => write!(f, "SAVED"),
            BillStatus::Paid => write!(f, "PAID"),
            BillStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl BillStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(BillStatus::Pending),
            "SAVED" => Some(BillStatus::Saved),
            "PAID" => Some(BillStatus::Paid),
            "FAILED" => Some(BillStatus::Failed),
            _ => None,
        }
    }
}

/// One line of a bill: a book reference with a quantity and price snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub book_id: String,
    pub title: String,
    quantity: i32,
    #[serde(rename = "price")]
    unit_price: f64,
    subtotal: f64,
}

impl BillItem {
    /// Create a line item; the subtotal is derived, never supplied
    pub fn new(book_id: String, title: String, quantity: i32, unit_price: f64) -> Self {
        Self {
            book_id,
            title,
            quantity,
            unit_price,
            subtotal: quantity as f64 * unit_price,
        }
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
        self.subtotal = self.quantity as f64 * self.unit_price;
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
        self.subtotal = self.quantity as f64 * self.unit_price;
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }
}

// A deserialized line item re-derives its subtotal; any subtotal present in
// the input is ignored.
impl<'de> Deserialize<'de> for BillItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            #[serde(default)]
            book_id: String,
            #[serde(default)]
            title: String,
            #[serde(default)]
            quantity: i32,
            #[serde(default)]
            price: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(BillItem::new(raw.book_id, raw.title, raw.quantity, raw.price))
    }
}

/// Bill entity
///
/// `subtotal`, `discount`, `tax` and `total` are caller-supplied and are
/// deliberately NOT cross-checked against the item lines; the total is
/// trusted input. The legacy flat-rate fields survive for bills created
/// before itemization existed; `total_amount` is recomputed whenever either
/// of the other two legacy fields is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Opaque storage identifier (assigned on first save)
    #[serde(default)]
    pub id: String,

    /// Human-facing bill number, assigned exactly once at construction
    bill_number: String,

    /// Customer account reference
    pub account_number: String,

    /// Customer name snapshot taken at generation time
    pub customer_name: String,

    /// Creation timestamp, immutable after construction
    pub bill_date: Option<DateTime<Utc>>,

    pub status: BillStatus,

    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,

    /// Ordered line items, owned exclusively by this bill
    #[serde(default)]
    pub items: Vec<BillItem>,

    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,

    pub admin_notes: Option<String>,

    // Legacy flat-rate billing fields
    units_consumed: i32,
    rate_per_unit: f64,
    total_amount: f64,
}

impl Bill {
    /// Create an empty bill with a freshly assigned bill number
    pub fn new(bill_number: String) -> Self {
        Self {
            id: String::new(),
            bill_number,
            account_number: String::new(),
            customer_name: String::new(),
            bill_date: Some(Utc::now()),
            status: BillStatus::Pending,
            payment_method: None,
            transaction_id: None,
            items: Vec::new(),
            subtotal: 0.0,
            discount: 0.0,
            tax: 0.0,
            total: 0.0,
            admin_notes: None,
            units_consumed: 0,
            rate_per_unit: 0.0,
            total_amount: 0.0,
        }
    }

    /// Create a legacy flat-rate bill (single implicit line)
    pub fn legacy(
        bill_number: String,
        account_number: String,
        customer_name: String,
        units_consumed: i32,
        rate_per_unit: f64,
    ) -> Self {
        let mut bill = Self::new(bill_number);
        bill.account_number = account_number;
        bill.customer_name = customer_name;
        bill.units_consumed = units_consumed;
        bill.rate_per_unit = rate_per_unit;
        bill.total_amount = units_consumed as f64 * rate_per_unit;
        bill
    }

    pub fn bill_number(&self) -> &str {
        &self.bill_number
    }

    pub fn units_consumed(&self) -> i32 {
        self.units_consumed
    }

    pub fn set_units_consumed(&mut self, units_consumed: i32) {
        self.units_consumed = units_consumed;
        self.total_amount = self.units_consumed as f64 * self.rate_per_unit;
    }

    pub fn rate_per_unit(&self) -> f64 {
        self.rate_per_unit
    }

    pub fn set_rate_per_unit(&mut self, rate_per_unit: f64) {
        self.rate_per_unit = rate_per_unit;
        self.total_amount = self.units_consumed as f64 * self.rate_per_unit;
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Date-only component of the bill date
    pub fn bill_day(&self) -> Option<chrono::NaiveDate> {
        self.bill_date.map(|d| d.date_naive())
    }
}
