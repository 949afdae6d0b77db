//! Billing engine
//!
//! Turns free-form billing payloads into persisted bills. The payload is an
//! untyped JSON object because several client generations send numerics in
//! different representations; every numeric field goes through the tolerant
//! coercion policy in [`crate::coerce`].

use crate::coerce::{coerce_f64, coerce_i32};
use pahana_core::models::{Bill, BillItem, BillStatus};
use pahana_core::traits::{BillStore, CustomerStore};
use pahana_core::{AppError, IdGenerator};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Billing engine over the customer and bill collections
#[derive(Clone)]
pub struct BillingEngine {
    customers: Arc<dyn CustomerStore>,
    bills: Arc<dyn BillStore>,
    ids: Arc<dyn IdGenerator>,
}

fn payload_str(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl BillingEngine {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        bills: Arc<dyn BillStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            customers,
            bills,
            ids,
        }
    }

    /// Generate an itemized bill from an untyped payload
    ///
    /// The customer account must resolve before anything is persisted; on any
    /// failure the store is left untouched. Line subtotals are derived from
    /// the coerced quantity and price, while the independent financial fields
    /// (`subtotal`, `discount`, `tax`, `total`) are taken from the payload
    /// as-is.
    ///
    /// # Errors
    ///
    /// - `MissingField("customerAccountNumber")` when the account field is
    ///   absent or blank
    /// - `CustomerNotFound` when no customer has that account number
    /// - `Validation` when `items` is missing or empty
    #[instrument(skip(self, payload))]
    pub async fn generate_itemized_bill(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<Bill, AppError> {
        let account_number = payload_str(payload, "customerAccountNumber")
            .ok_or_else(|| AppError::MissingField("customerAccountNumber".to_string()))?;

        let customer = self
            .customers
            .find_by_account_number(&account_number)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(account_number.clone()))?;

        let items = payload
            .get("items")
            .and_then(Value::as_array)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                AppError::Validation("items must be a non-empty array".to_string())
            })?;

        let mut bill = Bill::new(self.ids.next_bill_number());
        bill.account_number = customer.account_number.clone();
        bill.customer_name = customer.name.clone();

        for entry in items {
            let obj = entry.as_object();
            let field = |key: &str| obj.and_then(|o| o.get(key));

            bill.items.push(BillItem::new(
                field("bookId")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                field("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                coerce_i32(field("quantity")),
                coerce_f64(field("price")),
            ));
        }

        bill.payment_method = payload_str(payload, "paymentMethod");
        bill.transaction_id = payload_str(payload, "transactionId");
        bill.admin_notes = payload_str(payload, "adminNotes");

        bill.subtotal = coerce_f64(payload.get("subtotal"));
        bill.discount = coerce_f64(payload.get("discount"));
        bill.tax = coerce_f64(payload.get("tax"));
        bill.total = coerce_f64(payload.get("total"));

        let saved = self.bills.save(bill).await?;
        info!(
            bill_number = %saved.bill_number(),
            account = %saved.account_number,
            items = saved.items.len(),
            "Generated itemized bill"
        );
        Ok(saved)
    }

    /// Generate a legacy flat-rate bill (units × rate)
    #[instrument(skip(self))]
    pub async fn generate_legacy_bill(
        &self,
        account_number: &str,
        units_consumed: i32,
        rate_per_unit: f64,
    ) -> Result<Bill, AppError> {
        let customer = self
            .customers
            .find_by_account_number(account_number)
            .await?
            .ok_or_else(|| AppError::CustomerNotFound(account_number.to_string()))?;

        let bill = Bill::legacy(
            self.ids.next_bill_number(),
            customer.account_number.clone(),
            customer.name.clone(),
            units_consumed,
            rate_per_unit,
        );

        let saved = self.bills.save(bill).await?;
        info!(
            bill_number = %saved.bill_number(),
            account = %saved.account_number,
            "Generated legacy bill"
        );
        Ok(saved)
    }

    pub async fn all_bills(&self) -> Result<Vec<Bill>, AppError> {
        self.bills.find_all().await
    }

    pub async fn bill_by_id(&self, id: &str) -> Result<Bill, AppError> {
        self.bills
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BillNotFound(id.to_string()))
    }

    pub async fn bill_by_number(&self, bill_number: &str) -> Result<Bill, AppError> {
        self.bills
            .find_by_bill_number(bill_number)
            .await?
            .ok_or_else(|| AppError::BillNotFound(bill_number.to_string()))
    }

    /// Billing history for one account, newest first
    pub async fn history(&self, account_number: &str) -> Result<Vec<Bill>, AppError> {
        self.bills.find_by_account_number(account_number).await
    }

    pub async fn bills_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, AppError> {
        self.bills.find_by_status(status).await
    }

    /// Overwrite the status of a bill found by storage id
    ///
    /// Any status may replace any other; there is no transition graph.
    #[instrument(skip(self))]
    pub async fn update_status_by_id(
        &self,
        id: &str,
        status: BillStatus,
    ) -> Result<Bill, AppError> {
        let mut bill = self.bill_by_id(id).await?;
        bill.status = status;
        self.bills.save(bill).await
    }

    /// Overwrite the status of a bill found by bill number
    #[instrument(skip(self))]
    pub async fn update_status_by_bill_number(
        &self,
        bill_number: &str,
        status: BillStatus,
    ) -> Result<Bill, AppError> {
        let mut bill = self.bill_by_number(bill_number).await?;
        bill.status = status;
        self.bills.save(bill).await
    }

    /// Delete by storage id; silently a no-op when the id is unknown
    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        self.bills.delete_by_id(id).await
    }

    /// Delete by bill number; NotFound when the number is unknown
    ///
    /// The asymmetry with [`Self::delete_by_id`] is a long-standing part of
    /// the API contract.
    #[instrument(skip(self))]
    pub async fn delete_by_bill_number(&self, bill_number: &str) -> Result<(), AppError> {
        let bill = self.bill_by_number(bill_number).await?;
        self.bills.delete(&bill).await?;
        info!(bill_number = %bill_number, "Deleted bill");
        Ok(())
    }

    /// Case-insensitive substring search over bill number, customer name
    /// and account number
    pub async fn search(&self, term: &str) -> Result<Vec<Bill>, AppError> {
        let needle = term.to_lowercase();
        let bills = self.bills.find_all().await?;

        Ok(bills
            .into_iter()
            .filter(|b| {
                b.bill_number().to_lowercase().contains(&needle)
                    || b.customer_name.to_lowercase().contains(&needle)
                    || b.account_number.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
