//! Booking data model: the editable draft and the persisted booking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::catalog::{find_plan, Location, Plan, Product};
use crate::pricing::{AccessWindow, PricingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boy" => Ok(Gender::Boy),
            "girl" => Ok(Gender::Girl),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Child as typed into the form; any field may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Child on a validated booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentContact {
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub parent_email: String,
    #[serde(default)]
    pub parent_phone: String,
    #[serde(default)]
    pub parent_address: String,
}

/// In-progress booking form.
///
/// `pricing` is derived from the plan and headcount and is never accepted
/// from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(flatten)]
    pub parent: ParentContact,
    pub product: Product,
    pub location: Location,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub children: Vec<ChildDetails>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_deserializing)]
    pub pricing: Option<PricingResult>,
}

impl BookingDraft {
    /// Empty form with a single child row
    pub fn new(product: Product, location: Location) -> Self {
        Self {
            parent: ParentContact::default(),
            product,
            location,
            plan_id: None,
            children: vec![ChildDetails::default()],
            start_date: None,
            pricing: None,
        }
    }

    pub fn plan(&self) -> Option<&'static Plan> {
        self.plan_id
            .as_deref()
            .and_then(|id| find_plan(self.product, self.location, id))
    }
}

/// Paid booking ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(flatten)]
    pub parent: ParentContact,
    pub product: Product,
    pub location: Location,
    pub plan_id: String,
    pub plan_name: String,
    pub children: Vec<Child>,
    pub start_date: NaiveDate,
    pub access: Option<AccessWindow>,
    pub pricing: PricingResult,
    pub payment_id: String,
}

/// Stored booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[serde(flatten)]
    pub parent: ParentContact,
    pub product: Product,
    pub location: Location,
    pub plan_id: String,
    pub plan_name: String,
    pub children: Vec<Child>,
    pub start_date: NaiveDate,
    pub access: Option<AccessWindow>,
    pub pricing: PricingResult,
    pub payment_id: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(id: Uuid, new: NewBooking, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            parent: new.parent,
            product: new.product,
            location: new.location,
            plan_id: new.plan_id,
            plan_name: new.plan_name,
            children: new.children,
            start_date: new.start_date,
            access: new.access,
            pricing: new.pricing,
            payment_id: new.payment_id,
            created_at,
        }
    }

    /// "Sara and Omar" style list of the children's names
    pub fn child_names(&self) -> String {
        let names: Vec<&str> = self.children.iter().map(|c| c.name.as_str()).collect();
        match names.split_last() {
            None => String::new(),
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }
}

/// Draft that passed validation, with its server-side price
#[derive(Debug, Clone, PartialEq)]
pub struct PricedBooking {
    pub plan: &'static Plan,
    pub parent: ParentContact,
    pub product: Product,
    pub location: Location,
    pub children: Vec<Child>,
    pub start_date: NaiveDate,
    pub access: Option<AccessWindow>,
    pub pricing: PricingResult,
}

impl PricedBooking {
    /// Line shown on the card statement and gateway dashboard
    pub fn payment_description(&self) -> String {
        format!(
            "{} - {} ({}) x{}",
            self.product.display_name(),
            self.plan.name,
            self.location.display_name(),
            self.children.len()
        )
    }

    pub fn into_new_booking(self, payment_id: String) -> NewBooking {
        NewBooking {
            parent: self.parent,
            product: self.product,
            location: self.location,
            plan_id: self.plan.id.clone(),
            plan_name: self.plan.name.clone(),
            children: self.children,
            start_date: self.start_date,
            access: self.access,
            pricing: self.pricing,
            payment_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_reads_front_end_field_names() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "parentName": "Layla Hassan",
            "parentEmail": "layla@example.com",
            "parentPhone": "0501234567",
            "parentAddress": "Khalifa City, Abu Dhabi",
            "product": "kids-camp",
            "location": "abuDhabi",
            "planId": "5-days",
            "children": [{ "name": "Omar", "dateOfBirth": "2018-03-14", "gender": "boy" }],
            "startDate": "2026-07-06",
            "pricing": { "finalTotal": "1" }
        }))
        .unwrap();

        assert_eq!(draft.parent.parent_name, "Layla Hassan");
        assert_eq!(draft.children[0].gender, Some(Gender::Boy));
        assert_eq!(draft.plan().map(|p| p.name.as_str()), Some("5-Days Access"));
        assert!(draft.pricing.is_none());
    }

    #[test]
    fn test_child_names() {
        let child = |name: &str| Child {
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            gender: Gender::Girl,
        };
        let mut booking = Booking {
            id: Uuid::nil(),
            parent: ParentContact::default(),
            product: Product::KidsCamp,
            location: Location::AlAin,
            plan_id: "1-day".into(),
            plan_name: "1-Day Access".into(),
            children: vec![child("Sara")],
            start_date: NaiveDate::from_ymd_opt(2026, 7, 6).unwrap(),
            access: None,
            pricing: crate::pricing::calculate_pricing(rust_decimal_macros::dec!(250), 1).unwrap(),
            payment_id: "pi_1".into(),
            created_at: Utc::now(),
        };
        assert_eq!(booking.child_names(), "Sara");

        booking.children.push(child("Omar"));
        booking.children.push(child("Noor"));
        assert_eq!(booking.child_names(), "Sara, Omar and Noor");
    }
}
