//! Camp calendar eligibility of a start date.
//!
//! "Today" is always passed in through [`CampCalendar`] so these checks stay
//! pure and reproducible.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{AccessPeriod, CampWindow, Location, Plan};

/// The date the check runs on and the camp season being sold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampCalendar {
    pub today: NaiveDate,
    pub season: i32,
}

impl CampCalendar {
    pub fn new(today: NaiveDate, season: i32) -> Self {
        Self { today, season }
    }

    /// Calendar selling the season of the current year
    pub fn for_today(today: NaiveDate) -> Self {
        Self::new(today, today.year())
    }
}

/// First and last day a booking grants access, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl AccessWindow {
    fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            days: (end - start).num_days() + 1,
        }
    }
}

/// "August 21" style date used in customer-facing messages
pub fn month_day(date: NaiveDate) -> String {
    date.format("%B %-d").to_string()
}

/// Access period a plan grants when started on `start`.
///
/// Session packs are not tied to the calendar and have no window.
pub fn access_window(plan: &Plan, location: Location, start: NaiveDate, season: i32) -> Option<AccessWindow> {
    let end = match plan.access {
        AccessPeriod::Days(days) => start.checked_add_days(Days::new(u64::from(days.max(1)) - 1))?,
        AccessPeriod::FullCamp => location.window(season)?.end,
        AccessPeriod::Sessions(_) => return None,
    };
    if end < start {
        return None;
    }
    Some(AccessWindow::between(start, end))
}

/// Validate a start date against the camp calendar.
///
/// Returns the access window the booking would grant (None for session
/// packs), or the message to show next to the start date field.
pub fn check_start_date(
    plan: &Plan,
    location: Location,
    start: NaiveDate,
    calendar: &CampCalendar,
) -> Result<Option<AccessWindow>, String> {
    if start < calendar.today {
        return Err("Start date cannot be in the past".to_string());
    }

    if !plan.access.is_calendar_bounded() {
        return Ok(None);
    }

    let window = location
        .window(calendar.season)
        .ok_or_else(|| format!("Camp dates for {} are not available", calendar.season))?;

    check_window(&window, location, start)?;

    let access = access_window(plan, location, start, calendar.season)
        .ok_or_else(|| format!("Camp in {} ends on {}", location.display_name(), month_day(window.end)))?;

    if let AccessPeriod::Days(days) = plan.access {
        if access.end > window.end {
            return Err(format!("{}-day plan must be completed by {}", days, month_day(window.end)));
        }
    }

    Ok(Some(access))
}

fn check_window(window: &CampWindow, location: Location, start: NaiveDate) -> Result<(), String> {
    if !window.contains(start) {
        return Err(format!(
            "Camp in {} runs from {} to {}",
            location.display_name(),
            month_day(window.start),
            month_day(window.end)
        ));
    }
    if !window.allows_weekday(start) {
        return Err(format!(
            "Camp in {} runs {}",
            location.display_name(),
            window.weekday_label()
        ));
    }
    Ok(())
}
