//! Products, locations and purchasable plans.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product line a plan belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Product {
    KidsCamp,
    FootballClinic,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::KidsCamp => "kids-camp",
            Product::FootballClinic => "football-clinic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Product::KidsCamp => "Kids Camp",
            Product::FootballClinic => "Football Clinic",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kids-camp" => Ok(Product::KidsCamp),
            "football-clinic" => Ok(Product::FootballClinic),
            other => Err(format!("unknown product '{}'", other)),
        }
    }
}

const MONDAY_TO_FRIDAY: &[Weekday] = &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
const MONDAY_TO_THURSDAY: &[Weekday] = &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu];

/// Camp location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    AbuDhabi,
    AlAin,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::AbuDhabi => "abuDhabi",
            Location::AlAin => "alAin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Location::AbuDhabi => "Abu Dhabi",
            Location::AlAin => "Al Ain",
        }
    }

    /// Camp window for the given season year.
    ///
    /// Abu Dhabi runs July 1 to August 21, Monday to Friday.
    /// Al Ain runs July 5 to August 19, Monday to Thursday.
    pub fn window(&self, season: i32) -> Option<CampWindow> {
        let (start, end, weekdays) = match self {
            Location::AbuDhabi => (
                NaiveDate::from_ymd_opt(season, 7, 1)?,
                NaiveDate::from_ymd_opt(season, 8, 21)?,
                MONDAY_TO_FRIDAY,
            ),
            Location::AlAin => (
                NaiveDate::from_ymd_opt(season, 7, 5)?,
                NaiveDate::from_ymd_opt(season, 8, 19)?,
                MONDAY_TO_THURSDAY,
            ),
        };

        Some(CampWindow {
            start,
            end,
            weekdays,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abuDhabi" => Ok(Location::AbuDhabi),
            "alAin" => Ok(Location::AlAin),
            other => Err(format!("unknown location '{}'", other)),
        }
    }
}

/// Calendar range and operating weekdays of one location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weekdays: &'static [Weekday],
}

impl CampWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn allows_weekday(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&date.weekday())
    }

    /// "Monday to Friday" style label for error messages
    pub fn weekday_label(&self) -> String {
        match (self.weekdays.first(), self.weekdays.last()) {
            (Some(first), Some(last)) => format!("{} to {}", weekday_name(*first), weekday_name(*last)),
            _ => String::from("on no days"),
        }
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// What a plan grants once booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum AccessPeriod {
    /// Fixed number of consecutive calendar days from the start date
    Days(u32),
    /// From the start date to the end of the location's window
    FullCamp,
    /// Pack of clinic sessions, not tied to the camp calendar
    Sessions(u32),
}

impl AccessPeriod {
    pub fn is_calendar_bounded(&self) -> bool {
        !matches!(self, AccessPeriod::Sessions(_))
    }
}

/// A purchasable camp or clinic package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub features: Vec<String>,
    pub popular: bool,
    pub access: AccessPeriod,
}
