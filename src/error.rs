//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::booking::CheckoutError;
use crate::payment::PaymentError;
use crate::pricing::PricingError;
use crate::storage::StorageError;
use crate::validation::FieldErrors;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Payment {payment_id} captured but booking not saved: {reason}")]
    PaymentCapturedNotSaved { payment_id: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::Validation(errors) => AppError::Validation(errors),
            CheckoutError::Payment(e) => AppError::Payment(e),
            CheckoutError::PaymentCapturedNotSaved { payment_id, reason } => {
                AppError::PaymentCapturedNotSaved { payment_id, reason }
            }
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String, Option<Value>) {
        match self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, "not_found", format!("{} not found", what), None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Please correct the highlighted fields".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::Pricing(e) => (StatusCode::UNPROCESSABLE_ENTITY, "pricing_error", e.to_string(), None),
            AppError::Payment(e) if e.is_card_failure() => (
                StatusCode::PAYMENT_REQUIRED,
                "payment_failed",
                e.user_message().to_string(),
                Some(json!({ "code": e.code() })),
            ),
            AppError::Payment(e) => {
                tracing::error!("Payment gateway error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "payment_gateway_error",
                    e.user_message().to_string(),
                    Some(json!({ "code": e.code() })),
                )
            }
            AppError::PaymentCapturedNotSaved { payment_id, reason } => {
                tracing::error!("Booking lost after payment {}: {}", payment_id, reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "payment_captured_booking_not_saved",
                    format!(
                        "Your payment was successful but we could not save your booking. \
                         Please contact support with payment reference {}.",
                        payment_id
                    ),
                    Some(json!({ "paymentId": payment_id })),
                )
            }
            AppError::Storage(StorageError::DuplicatePayment(payment_id)) => (
                StatusCode::CONFLICT,
                "duplicate_booking",
                "A booking for this payment already exists".to_string(),
                Some(json!({ "paymentId": payment_id })),
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "Could not reach booking storage. Please try again.".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = self.parts();
        let body = ErrorBody {
            success: false,
            error_type,
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_type(e: AppError) -> (StatusCode, &'static str) {
        let (status, error_type, _, _) = e.parts();
        (status, error_type)
    }

    #[test]
    fn test_validation_is_422_with_field_details() {
        let mut errors = FieldErrors::new();
        errors.set("parentEmail", "Please enter a valid email address");
        let (status, error_type, _, details) = AppError::Validation(errors).parts();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_type, "validation_error");
        assert_eq!(details, Some(json!({ "parentEmail": "Please enter a valid email address" })));
    }

    #[test]
    fn test_card_failures_and_gateway_outages_differ() {
        assert_eq!(
            status_and_type(PaymentError::InsufficientFunds.into()),
            (StatusCode::PAYMENT_REQUIRED, "payment_failed")
        );
        assert_eq!(
            status_and_type(PaymentError::Unavailable("timeout".into()).into()),
            (StatusCode::BAD_GATEWAY, "payment_gateway_error")
        );
    }

    #[test]
    fn test_captured_payment_is_reported_separately() {
        let e = AppError::from(CheckoutError::PaymentCapturedNotSaved {
            payment_id: "pi_42".into(),
            reason: "connection reset".into(),
        });
        let (status, error_type, message, _) = e.parts();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_type, "payment_captured_booking_not_saved");
        assert!(message.contains("pi_42"));
        assert!(message.contains("contact support"));
    }

    #[test]
    fn test_not_found_and_duplicates() {
        assert_eq!(
            status_and_type(AppError::NotFound("Booking".into())),
            (StatusCode::NOT_FOUND, "not_found")
        );
        assert_eq!(
            status_and_type(StorageError::DuplicatePayment("pi_1".into()).into()),
            (StatusCode::CONFLICT, "duplicate_booking")
        );
    }
}
