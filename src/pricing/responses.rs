//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{sibling_discount_percent, PricingResult};
use super::quote::Quote;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// One line of the per-child breakdown
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLineResponse {
    pub position: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percent: Decimal,
    pub price: MoneyResponse,
}

/// Response for a quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub bookable: bool,
    pub plan_name: String,
    pub lines: Vec<ChildLineResponse>,
    pub pricing: Option<PricingResult>,
    pub access: Option<super::eligibility::AccessWindow>,
    pub errors: crate::validation::FieldErrors,
}

impl QuoteResponse {
    pub fn new(plan_name: &str, quote: Quote) -> Self {
        let lines = quote
            .pricing
            .as_ref()
            .map(|pricing| {
                pricing
                    .per_child_prices
                    .iter()
                    .enumerate()
                    .map(|(position, amount)| ChildLineResponse {
                        position,
                        discount_percent: sibling_discount_percent(position),
                        price: MoneyResponse {
                            amount: *amount,
                            currency: pricing.currency.clone(),
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bookable: quote.is_bookable(),
            plan_name: plan_name.to_string(),
            lines,
            pricing: quote.pricing,
            access: quote.access,
            errors: quote.errors,
        }
    }
}
