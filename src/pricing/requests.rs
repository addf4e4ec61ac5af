//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::catalog::{Location, Product};

/// Request to quote a plan selection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub product: Product,
    pub location: Location,
    pub plan_id: String,
    pub child_count: usize,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}
