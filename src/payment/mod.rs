//! Card payment gateway integration.

pub mod error;
pub mod gateway;
pub mod http;

pub use error::PaymentError;
pub use gateway::{ensure_amount, BillingDetails, CardDetails, PaymentConfirmation, PaymentGateway, PaymentIntent};
pub use http::HttpPaymentGateway;
