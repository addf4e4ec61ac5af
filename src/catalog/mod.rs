//! Product catalog: locations, camp calendars and plans.

pub mod models;
pub mod plans;
pub mod routes;

pub use models::{AccessPeriod, CampWindow, Location, Plan, Product};
pub use plans::{find_plan, plans_for};
pub use routes::router;
