//! Card payment gateway capability.
//!
//! The booking flow needs two round trips: create an intent for an amount,
//! then confirm it with card details. Payments confirmed in the browser are
//! looked up by id before a booking is stored. Concrete gateways live behind
//! [`PaymentGateway`] so the vendor can be swapped without touching checkout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;

/// Payment intent created for a booking amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: String,
}

/// Tokenised card, e.g. a payment method id from the browser card element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub payment_method: String,
}

/// Billing contact sent along with the charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
}

/// Successful charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent to charge `amount_minor` (fils) and return its client secret
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        description: &str,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Confirm the intent identified by `client_secret` with a card
    async fn confirm(
        &self,
        client_secret: &str,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError>;

    /// Look up a payment by id; only a succeeded payment is returned
    async fn retrieve(&self, payment_id: &str) -> Result<PaymentConfirmation, PaymentError>;
}

/// Reject a confirmation that did not charge exactly `expected_minor`
pub fn ensure_amount(confirmation: &PaymentConfirmation, expected_minor: i64) -> Result<(), PaymentError> {
    if confirmation.amount_minor == expected_minor {
        Ok(())
    } else {
        Err(PaymentError::AmountMismatch {
            expected: expected_minor,
            charged: confirmation.amount_minor,
        })
    }
}

/// Intent id embedded in a client secret (`pi_123_secret_abc` -> `pi_123`)
pub fn intent_id_from_secret(client_secret: &str) -> Option<&str> {
    client_secret
        .split_once("_secret_")
        .map(|(id, _)| id)
        .filter(|id| !id.is_empty())
}
