//! Analytics query DTOs
//!
//! Range parameters arrive as ISO `YYYY-MM-DD` calendar strings; a malformed
//! date is a 400, never silently ignored.

use chrono::NaiveDate;
use pahana_core::AppError;
use pahana_services::ReportType;
use serde::Deserialize;

fn parse_day(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::Validation(format!("invalid date: {}", s))),
        None => Ok(None),
    }
}

/// Dashboard date-range query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeParams {
    pub fn start(&self) -> Result<Option<NaiveDate>, AppError> {
        parse_day(self.start_date.as_deref())
    }

    pub fn end(&self) -> Result<Option<NaiveDate>, AppError> {
        parse_day(self.end_date.as_deref())
    }
}

/// Report query: date range plus report type
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub report_type: Option<String>,
}

impl ReportParams {
    pub fn start(&self) -> Result<Option<NaiveDate>, AppError> {
        parse_day(self.start_date.as_deref())
    }

    pub fn end(&self) -> Result<Option<NaiveDate>, AppError> {
        parse_day(self.end_date.as_deref())
    }

    pub fn report_type(&self) -> Option<ReportType> {
        self.report_type.as_deref().map(ReportType::from_str)
    }
}
