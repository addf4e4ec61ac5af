//! Pricing engine module.
//!
//! Sibling discounts, VAT and camp calendar eligibility for booking forms.
//! Everything below `routes` is pure: no I/O and no implicit clock.

pub mod calculators;
pub mod eligibility;
pub mod quote;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{
    calculate_pricing, child_price, round_money, sibling_discount_percent, to_minor_units, PricingError,
    PricingResult, MAX_CHILDREN,
};
pub use eligibility::{access_window, check_start_date, AccessWindow, CampCalendar};
pub use quote::{quote, Quote};
pub use routes::router;
