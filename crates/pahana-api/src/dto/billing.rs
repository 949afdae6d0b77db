//! Billing request DTOs

use pahana_core::models::BillStatus;
use pahana_core::AppError;
use serde::Deserialize;
use validator::Validate;

/// Status overwrite request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl UpdateStatusRequest {
    /// Parse into a bill status, rejecting unknown values
    pub fn bill_status(&self) -> Result<BillStatus, AppError> {
        BillStatus::from_str(&self.status)
            .ok_or_else(|| AppError::Validation(format!("unknown bill status: {}", self.status)))
    }
}

/// Legacy flat-rate bill request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBillRequest {
    #[validate(length(min = 1, message = "accountNumber is required"))]
    pub account_number: String,

    pub units_consumed: i32,
    pub rate_per_unit: f64,
}

/// Bill search query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub search_term: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        let req = UpdateStatusRequest {
            status: "paid".to_string(),
        };
        assert_eq!(req.bill_status().unwrap(), BillStatus::Paid);

        let req = UpdateStatusRequest {
            status: "REFUNDED".to_string(),
        };
        assert!(matches!(req.bill_status(), Err(AppError::Validation(_))));
    }
}
