//! Card payment failures and the messages shown to parents.

/// Payment failure taxonomy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("card declined ({code}): {message}")]
    Declined { code: String, message: String },

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("card expired")]
    ExpiredCard,

    #[error("incorrect CVC")]
    IncorrectCvc,

    #[error("payment processing error")]
    ProcessingError,

    #[error("payment session expired")]
    SessionExpired,

    #[error("payment requires additional authentication")]
    RequiresAction,

    #[error("payment not found")]
    PaymentNotFound,

    #[error("payment {payment_id} is {status}, not succeeded")]
    NotCompleted { payment_id: String, status: String },

    #[error("charged {charged} minor units but the booking total is {expected}")]
    AmountMismatch { expected: i64, charged: i64 },

    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),

    #[error("payment gateway is not configured")]
    NotConfigured,

    #[error("unexpected payment gateway response: {0}")]
    InvalidResponse(String),
}

impl PaymentError {
    /// Map a gateway error code to a typed failure
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            "insufficient_funds" => PaymentError::InsufficientFunds,
            "expired_card" => PaymentError::ExpiredCard,
            "incorrect_cvc" => PaymentError::IncorrectCvc,
            "processing_error" => PaymentError::ProcessingError,
            "payment_intent_unexpected_state" => PaymentError::SessionExpired,
            "authentication_required" => PaymentError::RequiresAction,
            "resource_missing" => PaymentError::PaymentNotFound,
            _ => PaymentError::Declined {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    /// Stable code for API clients
    pub fn code(&self) -> &str {
        match self {
            PaymentError::Declined { code, .. } => code.as_str(),
            PaymentError::InsufficientFunds => "insufficient_funds",
            PaymentError::ExpiredCard => "expired_card",
            PaymentError::IncorrectCvc => "incorrect_cvc",
            PaymentError::ProcessingError => "processing_error",
            PaymentError::SessionExpired => "payment_intent_unexpected_state",
            PaymentError::RequiresAction => "authentication_required",
            PaymentError::PaymentNotFound => "resource_missing",
            PaymentError::NotCompleted { .. } => "payment_not_completed",
            PaymentError::AmountMismatch { .. } => "amount_mismatch",
            PaymentError::Unavailable(_) => "gateway_unavailable",
            PaymentError::NotConfigured => "gateway_not_configured",
            PaymentError::InvalidResponse(_) => "gateway_invalid_response",
        }
    }

    /// The card was refused, as opposed to the gateway misbehaving
    pub fn is_card_failure(&self) -> bool {
        !matches!(
            self,
            PaymentError::Unavailable(_) | PaymentError::NotConfigured | PaymentError::InvalidResponse(_)
        )
    }

    /// Text for the payment error page
    pub fn user_message(&self) -> &'static str {
        match self {
            PaymentError::SessionExpired => "Payment session expired. Please try again.",
            PaymentError::Declined { code, .. } if code == "card_declined" => {
                "Your card was declined. Please check your card details or try a different card."
            }
            PaymentError::InsufficientFunds => {
                "Insufficient funds in your account. Please try a different payment method."
            }
            PaymentError::ExpiredCard => "Your card has expired. Please use a different card.",
            PaymentError::IncorrectCvc => "Incorrect CVC code. Please check and try again.",
            PaymentError::ProcessingError => "Payment processing error. Please try again.",
            PaymentError::RequiresAction => {
                "Your bank needs to confirm this payment. Please try again and follow your bank's instructions."
            }
            PaymentError::PaymentNotFound | PaymentError::NotCompleted { .. } => {
                "We could not find a completed payment for this booking. Please try again."
            }
            PaymentError::AmountMismatch { .. } => {
                "The amount paid does not match the booking total. Please contact us before trying again."
            }
            PaymentError::Unavailable(_) | PaymentError::NotConfigured | PaymentError::InvalidResponse(_) => {
                "An unexpected error occurred. Please try again."
            }
            PaymentError::Declined { .. } => "Payment failed. Please try again.",
        }
    }
}
