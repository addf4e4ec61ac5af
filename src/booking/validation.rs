//! Booking form field rules.

use chrono::NaiveDate;

use super::models::{BookingDraft, Child, ChildDetails, PricedBooking};
use crate::pricing::{calculate_pricing, check_start_date, CampCalendar, MAX_CHILDREN};
use crate::validation::{is_valid_email, is_valid_uae_phone, FieldErrors, REQUIRED};

pub const MIN_CHILD_AGE: u32 = 4;
pub const MAX_CHILD_AGE: u32 = 12;

const NAME_CHARS: std::ops::RangeInclusive<usize> = 3..=20;

/// Whole years between `date_of_birth` and `today`; None for future dates
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(date_of_birth)
}

/// Collect every field problem of the draft, keyed by field path
pub fn validate_draft(draft: &BookingDraft, calendar: &CampCalendar) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let parent = &draft.parent;
    errors.require("parentName", &parent.parent_name);
    if errors.require("parentEmail", &parent.parent_email) && !is_valid_email(&parent.parent_email) {
        errors.set("parentEmail", "Please enter a valid email address");
    }
    if errors.require("parentPhone", &parent.parent_phone) && !is_valid_uae_phone(&parent.parent_phone) {
        errors.set("parentPhone", "Please enter a valid UAE phone number");
    }
    errors.require("parentAddress", &parent.parent_address);

    if draft.children.is_empty() {
        errors.set("children", "Please add at least one child");
    } else if draft.children.len() > MAX_CHILDREN {
        errors.set("children", format!("A booking can include at most {} children", MAX_CHILDREN));
    }
    for (index, child) in draft.children.iter().enumerate() {
        validate_child(&mut errors, index, child, calendar.today);
    }

    let plan = match draft.plan_id.as_deref().map(str::trim) {
        None | Some("") => {
            errors.set("planId", REQUIRED);
            None
        }
        Some(_) => {
            let plan = draft.plan();
            if plan.is_none() {
                errors.set("planId", "Please select a valid plan");
            }
            plan
        }
    };

    match (draft.start_date, plan) {
        (None, _) => errors.set("startDate", REQUIRED),
        (Some(start), Some(plan)) => {
            if let Err(message) = check_start_date(plan, draft.location, start, calendar) {
                errors.set("startDate", message);
            }
        }
        // date rules depend on the plan
        (Some(_), None) => {}
    }

    errors
}

fn validate_child(errors: &mut FieldErrors, index: usize, child: &ChildDetails, today: NaiveDate) {
    let field = |name: &str| format!("children[{}].{}", index, name);

    if errors.require(&field("name"), &child.name) && !NAME_CHARS.contains(&child.name.trim().chars().count()) {
        errors.set(field("name"), "Name must be between 3 and 20 characters");
    }

    match child.date_of_birth {
        None => errors.set(field("dateOfBirth"), REQUIRED),
        Some(dob) => {
            let in_range = age_on(dob, today).is_some_and(|age| (MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&age));
            if !in_range {
                errors.set(
                    field("dateOfBirth"),
                    format!("Child must be between {} and {} years old", MIN_CHILD_AGE, MAX_CHILD_AGE),
                );
            }
        }
    }

    if child.gender.is_none() {
        errors.set(field("gender"), REQUIRED);
    }
}

/// Validate the draft and price it on the server.
///
/// Client-side pricing on the draft is ignored; the returned booking carries
/// the price computed here.
pub fn validate_and_price(draft: &BookingDraft, calendar: &CampCalendar) -> Result<PricedBooking, FieldErrors> {
    let mut errors = validate_draft(draft, calendar);

    let (Some(plan), Some(start_date)) = (draft.plan(), draft.start_date) else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let pricing = match calculate_pricing(plan.price, draft.children.len()) {
        Ok(pricing) => pricing,
        Err(e) => {
            errors.set("children", e.to_string());
            return Err(errors);
        }
    };
    let access = match check_start_date(plan, draft.location, start_date, calendar) {
        Ok(access) => access,
        Err(message) => {
            errors.set("startDate", message);
            return Err(errors);
        }
    };

    let children = draft
        .children
        .iter()
        .filter_map(|c| {
            Some(Child {
                name: c.name.trim().to_string(),
                date_of_birth: c.date_of_birth?,
                gender: c.gender?,
            })
        })
        .collect();

    Ok(PricedBooking {
        plan,
        parent: draft.parent.clone(),
        product: draft.product,
        location: draft.location,
        children,
        start_date,
        access,
        pricing,
    })
}
