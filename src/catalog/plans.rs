//! Static plan catalog.
//!
//! Both locations sell the same line-up; only the camp calendar differs.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{AccessPeriod, Location, Plan, Product};

static KIDS_CAMP: OnceLock<Vec<Plan>> = OnceLock::new();
static FOOTBALL_CLINIC: OnceLock<Vec<Plan>> = OnceLock::new();

fn plan(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    features: &[&str],
    popular: bool,
    access: AccessPeriod,
) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        features: features.iter().map(|f| f.to_string()).collect(),
        popular,
        access,
    }
}

fn kids_camp_plans() -> &'static [Plan] {
    KIDS_CAMP.get_or_init(|| {
        vec![
            plan(
                "1-day",
                "1-Day Access",
                "Perfect for trying out our summer camp",
                dec!(250),
                &["Full day camp activities", "Professional supervision"],
                false,
                AccessPeriod::Days(1),
            ),
            plan(
                "3-days",
                "3-Days Access",
                "Great for a short camp experience",
                dec!(650),
                &["All 1-day features", "Extended skill development", "Progress tracking"],
                false,
                AccessPeriod::Days(3),
            ),
            plan(
                "5-days",
                "5-Days Access",
                "Complete summer camp experience",
                dec!(850),
                &["All 3-day features", "Full week activities", "Individual attention"],
                true,
                AccessPeriod::Days(5),
            ),
            plan(
                "10-days",
                "10-Days Access",
                "Extended camp experience",
                dec!(1600),
                &[
                    "All 5-day features",
                    "Advanced activities",
                    "Special workshops",
                    "Extended care options",
                ],
                false,
                AccessPeriod::Days(10),
            ),
            plan(
                "20-days",
                "20-Days Access",
                "Full summer camp experience",
                dec!(3000),
                &[
                    "All 10-day features",
                    "Complete summer program",
                    "Priority registration",
                    "Exclusive activities",
                ],
                false,
                AccessPeriod::Days(20),
            ),
            plan(
                "full-camp",
                "Full Camp Access",
                "Unlimited access to all camp days and activities",
                dec!(5700),
                &[
                    "All 20-day features",
                    "Unlimited access",
                    "Personalized coaching",
                    "Exclusive events",
                ],
                false,
                AccessPeriod::FullCamp,
            ),
        ]
    })
}

fn football_clinic_plans() -> &'static [Plan] {
    FOOTBALL_CLINIC.get_or_init(|| {
        vec![
            plan(
                "1-day",
                "1 Day Access",
                "Perfect for trying out our football clinic",
                dec!(150),
                &["Professional coaching", "Skill assessment", "Training equipment provided"],
                false,
                AccessPeriod::Sessions(1),
            ),
            plan(
                "1-week",
                "1 Week (3 sessions)",
                "Comprehensive football training program",
                dec!(390),
                &[
                    "Professional coaching",
                    "Advanced skill development",
                    "Tactical training",
                    "Progress tracking",
                ],
                true,
                AccessPeriod::Sessions(3),
            ),
            plan(
                "full-month",
                "Full Month (12 sessions)",
                "Complete football development experience",
                dec!(1440),
                &[
                    "Professional coaching",
                    "Match play experience",
                    "Progress tracking",
                    "Performance report",
                ],
                false,
                AccessPeriod::Sessions(12),
            ),
            plan(
                "full-camp",
                "Full Camp Access (21 sessions)",
                "Ultimate football training experience",
                dec!(2520),
                &[
                    "Professional coaching",
                    "Extended training period",
                    "Comprehensive skill development",
                    "Advanced tactical understanding",
                ],
                false,
                AccessPeriod::Sessions(21),
            ),
        ]
    })
}

/// Plans on sale for a product at a location.
///
/// Both locations sell the same plans; only the camp calendar differs.
pub fn plans_for(product: Product, _location: Location) -> &'static [Plan] {
    match product {
        Product::KidsCamp => kids_camp_plans(),
        Product::FootballClinic => football_clinic_plans(),
    }
}

/// Look up a plan by its id
pub fn find_plan(product: Product, location: Location, plan_id: &str) -> Option<&'static Plan> {
    plans_for(product, location).iter().find(|p| p.id == plan_id)
}
