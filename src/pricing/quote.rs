//! Combined price and date eligibility verdict for a plan selection.

use chrono::NaiveDate;
use serde::Serialize;

use super::calculators::{calculate_pricing, PricingError, PricingResult};
use super::eligibility::{check_start_date, AccessWindow, CampCalendar};
use crate::catalog::{Location, Plan};
use crate::validation::{FieldErrors, REQUIRED};

/// Outcome of quoting a selection. `errors` is empty when the selection can be booked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub pricing: Option<PricingResult>,
    pub access: Option<AccessWindow>,
    pub errors: FieldErrors,
}

impl Quote {
    pub fn is_bookable(&self) -> bool {
        self.errors.is_empty() && self.pricing.is_some()
    }
}

/// Price `child_count` children on `plan` and check the chosen start date.
pub fn quote(
    plan: &Plan,
    location: Location,
    child_count: usize,
    start_date: Option<NaiveDate>,
    calendar: &CampCalendar,
) -> Quote {
    let mut errors = FieldErrors::new();

    let pricing = match calculate_pricing(plan.price, child_count) {
        Ok(pricing) => Some(pricing),
        Err(e @ PricingError::ChildCount { .. }) => {
            errors.set("children", e.to_string());
            None
        }
        Err(e) => {
            errors.set("planId", e.to_string());
            None
        }
    };

    let access = match start_date {
        None => {
            errors.set("startDate", REQUIRED);
            None
        }
        Some(start) => match check_start_date(plan, location, start, calendar) {
            Ok(access) => access,
            Err(message) => {
                errors.set("startDate", message);
                None
            }
        },
    };

    Quote {
        pricing,
        access,
        errors,
    }
}
