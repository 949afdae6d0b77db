//! Order request DTOs

use pahana_core::models::OrderStatus;
use pahana_core::AppError;
use serde::Deserialize;

/// Order status overwrite request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    pub status: String,
}

impl OrderStatusRequest {
    pub fn order_status(&self) -> Result<OrderStatus, AppError> {
        OrderStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Validation(format!("unknown order status: {}", self.status)))
    }
}
