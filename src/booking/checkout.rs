//! Validate, charge, persist, confirm.
//!
//! Each step runs once and in order. A failed payment leaves nothing behind;
//! a storage failure after the card was charged is reported separately
//! because the parent has already paid.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::models::{Booking, BookingDraft, PricedBooking};
use super::validation::validate_and_price;
use crate::notify::{dispatch_in_background, Email, EmailNotifier};
use crate::payment::{
    ensure_amount, BillingDetails, CardDetails, PaymentConfirmation, PaymentError, PaymentGateway, PaymentIntent,
};
use crate::pricing::CampCalendar;
use crate::storage::{BookingRepository, StorageError};
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Booking form is invalid: {0}")]
    Validation(FieldErrors),

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Payment {payment_id} succeeded but the booking was not saved: {reason}")]
    PaymentCapturedNotSaved { payment_id: String, reason: String },
}

/// Priced booking waiting for the card to be confirmed
#[derive(Debug, Clone)]
pub struct PendingCheckout {
    pub booking: PricedBooking,
    pub intent: PaymentIntent,
}

#[derive(Clone)]
pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn EmailNotifier>,
    currency: String,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        bookings: Arc<dyn BookingRepository>,
        notifier: Arc<dyn EmailNotifier>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            bookings,
            notifier,
            currency: currency.into(),
        }
    }

    /// Validate and price the draft, then open a payment intent for the total
    pub async fn start(&self, draft: &BookingDraft, calendar: &CampCalendar) -> Result<PendingCheckout, CheckoutError> {
        let booking = validate_and_price(draft, calendar).map_err(CheckoutError::Validation)?;

        let amount_minor = booking.pricing.final_total_minor();
        let intent = self
            .gateway
            .create_intent(amount_minor, &self.currency, &booking.payment_description())
            .await
            .map_err(|e| {
                warn!("Could not create payment intent for {} fils: {}", amount_minor, e);
                e
            })?;

        info!(intent = %intent.id, amount_minor, "Payment intent created");
        Ok(PendingCheckout { booking, intent })
    }

    /// Charge the card, then store the booking and send the confirmation
    pub async fn complete(
        &self,
        pending: PendingCheckout,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<Booking, CheckoutError> {
        let confirmation = self
            .gateway
            .confirm(&pending.intent.client_secret, card, billing)
            .await
            .map_err(|e| {
                warn!(intent = %pending.intent.id, "Payment not completed: {}", e);
                e
            })?;

        ensure_amount(&confirmation, pending.booking.pricing.final_total_minor()).map_err(|e| {
            error!(payment = %confirmation.payment_id, "Booking not saved: {}", e);
            e
        })?;

        let payment_id = confirmation.payment_id;
        self.record_paid_booking(pending.booking, payment_id.clone())
            .await
            .map_err(|e| {
                error!(payment = %payment_id, "Payment captured but booking not saved: {}", e);
                CheckoutError::PaymentCapturedNotSaved {
                    payment_id,
                    reason: e.to_string(),
                }
            })
    }

    /// Check with the gateway that `payment_id` succeeded for exactly this booking's total
    pub async fn verify_payment(
        &self,
        payment_id: &str,
        booking: &PricedBooking,
    ) -> Result<PaymentConfirmation, PaymentError> {
        let confirmation = self.gateway.retrieve(payment_id).await.map_err(|e| {
            warn!(payment = %payment_id, "Payment not verified: {}", e);
            e
        })?;

        ensure_amount(&confirmation, booking.pricing.final_total_minor()).map_err(|e| {
            error!(payment = %payment_id, "Booking not saved: {}", e);
            e
        })?;
        Ok(confirmation)
    }

    /// Whole flow in one call
    pub async fn checkout(
        &self,
        draft: &BookingDraft,
        card: &CardDetails,
        billing: &BillingDetails,
        calendar: &CampCalendar,
    ) -> Result<Booking, CheckoutError> {
        let pending = self.start(draft, calendar).await?;
        self.complete(pending, card, billing).await
    }

    /// Store a booking whose payment has already succeeded and queue its confirmation email
    pub async fn record_paid_booking(&self, booking: PricedBooking, payment_id: String) -> Result<Booking, StorageError> {
        let booking = self.bookings.insert_booking(booking.into_new_booking(payment_id)).await?;
        info!(booking = %booking.id, payment = %booking.payment_id, "Booking saved");

        dispatch_in_background(self.notifier.clone(), Email::booking_confirmation(&booking));
        Ok(booking)
    }
}
