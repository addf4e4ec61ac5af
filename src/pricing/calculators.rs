//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no clock.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Most children one booking may include
pub const MAX_CHILDREN: usize = 5;

/// VAT applied to every booking
pub const TAX_RATE: Decimal = dec!(0.05);

pub const CURRENCY: &str = "AED";

/// Round to specified decimal places, halves away from zero.
///
/// This is the commercial rounding customers see on receipts: 34.375 becomes
/// 34.38 and 7.525 becomes 7.53.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use summercamp_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(34.375), 2), dec!(34.38));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Sibling discount in percent for the child at `position` (0-based).
///
/// The first child pays full price, the second gets 10% off, the third 15%,
/// and every child after that 20%.
pub fn sibling_discount_percent(position: usize) -> Decimal {
    if position == 0 {
        return Decimal::ZERO;
    }
    let steps = (position - 1).min(2) as i64;
    Decimal::from(10 + steps * 5)
}

/// Price of the child at `position` after the sibling discount, rounded to fils.
pub fn child_price(base_price: Decimal, position: usize) -> Decimal {
    let factor = Decimal::ONE - sibling_discount_percent(position) / Decimal::ONE_HUNDRED;
    round_money(base_price * factor, 2)
}

/// Convert an AED amount to the integer minor units (fils) a card gateway charges.
pub fn to_minor_units(amount: Decimal) -> i64 {
    (round_money(amount, 2) * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or(0)
}

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("A booking needs between 1 and {max} children, got {count}")]
    ChildCount { count: usize, max: usize },

    #[error("Plan price must be positive, got {0}")]
    NonPositivePrice(Decimal),
}

/// Deterministic price breakdown of one booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub per_child_prices: Vec<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
    pub currency: String,
}

impl PricingResult {
    pub fn child_count(&self) -> usize {
        self.per_child_prices.len()
    }

    pub fn final_total_minor(&self) -> i64 {
        to_minor_units(self.final_total)
    }
}

/// Price a booking of `child_count` children on a plan costing `base_price` each.
///
/// `final_total` is always exactly `subtotal + tax_amount`; rounding happens
/// once per child price and once on the tax.
pub fn calculate_pricing(base_price: Decimal, child_count: usize) -> Result<PricingResult, PricingError> {
    if child_count == 0 || child_count > MAX_CHILDREN {
        return Err(PricingError::ChildCount {
            count: child_count,
            max: MAX_CHILDREN,
        });
    }
    if base_price <= Decimal::ZERO {
        return Err(PricingError::NonPositivePrice(base_price));
    }

    let per_child_prices: Vec<Decimal> = (0..child_count)
        .map(|position| child_price(base_price, position))
        .collect();

    let subtotal: Decimal = per_child_prices.iter().copied().sum();
    let original_total = base_price * Decimal::from(child_count);
    let discount_total = original_total - subtotal;
    let tax_amount = round_money(subtotal * TAX_RATE, 2);
    let final_total = subtotal + tax_amount;

    Ok(PricingResult {
        per_child_prices,
        subtotal,
        original_total,
        discount_total,
        tax_rate: TAX_RATE,
        tax_amount,
        final_total,
        currency: CURRENCY.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_halves_away_from_zero() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(3));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(34.375), 2), dec!(34.38));
        assert_eq!(round_money(dec!(7.525), 2), dec!(7.53));
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-3));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(0), 2), dec!(0));
        assert_eq!(round_money(dec!(999999.995), 2), dec!(1000000.00));
    }

    // ==================== sibling discount tests ====================

    #[test]
    fn test_sibling_discount_tiers() {
        assert_eq!(sibling_discount_percent(0), dec!(0));
        assert_eq!(sibling_discount_percent(1), dec!(10));
        assert_eq!(sibling_discount_percent(2), dec!(15));
        assert_eq!(sibling_discount_percent(3), dec!(20));
        assert_eq!(sibling_discount_percent(4), dec!(20));
        assert_eq!(sibling_discount_percent(50), dec!(20));
    }

    #[test]
    fn test_child_price_is_non_increasing_and_floors_at_80_percent() {
        for base in [dec!(1), dec!(150), dec!(250), dec!(333.33), dec!(5700)] {
            assert_eq!(child_price(base, 0), base);
            for position in 1..MAX_CHILDREN {
                assert!(child_price(base, position) <= child_price(base, position - 1));
            }
            for position in 3..MAX_CHILDREN {
                assert_eq!(child_price(base, position), round_money(base * dec!(0.8), 2));
            }
        }
    }

    // ==================== calculate_pricing tests ====================

    #[test]
    fn test_three_children_one_day_abu_dhabi() {
        let result = calculate_pricing(dec!(250), 3).unwrap();

        assert_eq!(result.per_child_prices, vec![dec!(250), dec!(225), dec!(212.5)]);
        assert_eq!(result.subtotal, dec!(687.5));
        assert_eq!(result.original_total, dec!(750));
        assert_eq!(result.discount_total, dec!(62.5));
        assert_eq!(result.tax_amount, dec!(34.38));
        assert_eq!(result.final_total, dec!(721.88));
        assert_eq!(result.final_total_minor(), 72188);
    }

    #[test]
    fn test_single_child_has_no_discount() {
        let result = calculate_pricing(dec!(150), 1).unwrap();

        assert_eq!(result.per_child_prices, vec![dec!(150)]);
        assert_eq!(result.subtotal, dec!(150));
        assert_eq!(result.discount_total, dec!(0));
        assert_eq!(result.tax_amount, dec!(7.5));
        assert_eq!(result.final_total, dec!(157.5));
    }

    #[test]
    fn test_five_children() {
        let result = calculate_pricing(dec!(850), 5).unwrap();

        assert_eq!(
            result.per_child_prices,
            vec![dec!(850), dec!(765), dec!(722.5), dec!(680), dec!(680)]
        );
        assert_eq!(result.subtotal, dec!(3697.5));
        assert_eq!(result.tax_amount, dec!(184.88));
        assert_eq!(result.final_total, dec!(3882.38));
    }

    #[test]
    fn test_totals_add_up_exactly() {
        for base in [dec!(1), dec!(150), dec!(250), dec!(390), dec!(1440), dec!(333.33), dec!(5700)] {
            for count in 1..=MAX_CHILDREN {
                let result = calculate_pricing(base, count).unwrap();
                assert_eq!(result.subtotal + result.tax_amount, result.final_total);
                assert_eq!(result.tax_amount, round_money(result.subtotal * dec!(0.05), 2));
                assert_eq!(result.original_total - result.discount_total, result.subtotal);
                assert!(result.final_total.scale() <= 2);
            }
        }
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let first = calculate_pricing(dec!(650), 4).unwrap();
        let second = calculate_pricing(dec!(650), 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_child_count_bounds() {
        assert_eq!(
            calculate_pricing(dec!(250), 0),
            Err(PricingError::ChildCount { count: 0, max: 5 })
        );
        assert_eq!(
            calculate_pricing(dec!(250), 6),
            Err(PricingError::ChildCount { count: 6, max: 5 })
        );
    }

    #[test]
    fn test_non_positive_price() {
        assert_eq!(
            calculate_pricing(dec!(0), 1),
            Err(PricingError::NonPositivePrice(dec!(0)))
        );
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(dec!(157.5)), 15750);
        assert_eq!(to_minor_units(dec!(0.005)), 1);
        assert_eq!(to_minor_units(dec!(1)), 100);
    }
}
