//! Post-payment registration, consent and health declaration.

pub mod models;
pub mod routes;
pub mod validation;

pub use models::{ConsentForm, ConsentSubmission, MEDICAL_QUESTIONS};
pub use routes::router;
pub use validation::{decode_signature, validate_consent};
