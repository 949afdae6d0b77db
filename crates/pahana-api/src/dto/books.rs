//! Catalog request DTOs

use pahana_core::models::StockStatus;
use pahana_core::AppError;
use serde::Deserialize;

/// Stock adjustment request; an explicit status overrides derivation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateRequest {
    pub stock_quantity: i32,
    pub status: Option<String>,
}

impl StockUpdateRequest {
    pub fn stock_status(&self) -> Result<Option<StockStatus>, AppError> {
        match self.status.as_deref() {
            None => Ok(None),
            Some(s) => StockStatus::from_str(s)
                .map(Some)
                .ok_or_else(|| AppError::Validation(format!("unknown stock status: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_status_parse() {
        let req = StockUpdateRequest {
            stock_quantity: 5,
            status: Some("low_stock".to_string()),
        };
        assert_eq!(req.stock_status().unwrap(), Some(StockStatus::LowStock));

        let req = StockUpdateRequest {
            stock_quantity: 5,
            status: None,
        };
        assert_eq!(req.stock_status().unwrap(), None);

        let req = StockUpdateRequest {
            stock_quantity: 5,
            status: Some("backordered".to_string()),
        };
        assert!(req.stock_status().is_err());
    }
}
