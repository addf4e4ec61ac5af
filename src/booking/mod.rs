//! Booking form, checkout and persisted bookings.

pub mod checkout;
pub mod draft;
pub mod models;
pub mod routes;
pub mod validation;

pub use checkout::{CheckoutError, CheckoutService, PendingCheckout};
pub use draft::DraftAction;
pub use models::{Booking, BookingDraft, Child, ChildDetails, Gender, NewBooking, ParentContact, PricedBooking};
pub use routes::router;
pub use validation::{validate_and_price, validate_draft};
