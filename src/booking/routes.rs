//! Booking and payment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::checkout::CheckoutError;
use super::models::{Booking, BookingDraft};
use super::validation::validate_and_price;
use crate::error::{AppError, Result};
use crate::payment::{BillingDetails, CardDetails};
use crate::pricing::PricingResult;
use crate::storage::StorageError;
use crate::validation::{FieldErrors, REQUIRED};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/api/bookings", post(record_booking))
        .route("/api/bookings/:id", get(get_booking))
        .route("/api/checkout", post(checkout))
}

/// Booking form plus the id of the payment the browser confirmed.
/// The id is checked with the gateway before anything is stored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBookingRequest {
    #[serde(flatten)]
    pub draft: BookingDraft,
    pub payment_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub draft: BookingDraft,
    pub card: CardDetails,
    #[serde(default)]
    pub billing: BillingDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub pricing: PricingResult,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

/// POST /create-payment-intent
///
/// The amount always comes from server-side pricing of the posted draft.
async fn create_payment_intent(
    State(state): State<AppState>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<PaymentIntentResponse>> {
    let calendar = state.calendar();
    let pending = state.checkout().start(&draft, &calendar).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: pending.intent.client_secret,
        payment_intent_id: pending.intent.id,
        amount_minor: pending.intent.amount_minor,
        currency: pending.intent.currency,
        pricing: pending.booking.pricing,
    }))
}

/// POST /api/bookings
async fn record_booking(
    State(state): State<AppState>,
    Json(req): Json<RecordBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let payment_id = req.payment_id.trim().to_string();
    if payment_id.is_empty() {
        let mut errors = FieldErrors::new();
        errors.set("paymentId", REQUIRED);
        return Err(AppError::Validation(errors));
    }

    let calendar = state.calendar();
    let priced = validate_and_price(&req.draft, &calendar).map_err(|errors| {
        // the card may already be charged for this one
        warn!(payment = %payment_id, "Paid booking failed validation: {}", errors);
        AppError::Validation(errors)
    })?;

    let checkout = state.checkout();
    let payment_id = checkout.verify_payment(&payment_id, &priced).await?.payment_id;

    let booking = checkout
        .record_paid_booking(priced, payment_id.clone())
        .await
        .map_err(|e| match e {
            StorageError::DuplicatePayment(_) => AppError::Storage(e),
            other => {
                error!(payment = %payment_id, "Payment captured but booking not saved: {}", other);
                AppError::PaymentCapturedNotSaved {
                    payment_id,
                    reason: other.to_string(),
                }
            }
        })?;
    state.cache.bookings.insert(booking.id, Arc::new(booking.clone())).await;

    Ok((StatusCode::CREATED, Json(BookingResponse { success: true, booking })))
}

/// GET /api/bookings/{id}
async fn get_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Booking>> {
    let booking = state
        .booking(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {}", id)))?;
    Ok(Json((*booking).clone()))
}

/// POST /api/checkout
async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let calendar = state.calendar();
    let booking = state
        .checkout()
        .checkout(&req.draft, &req.card, &req.billing, &calendar)
        .await
        .map_err(|e| {
            if let CheckoutError::Validation(errors) = &e {
                info!("Checkout rejected: {}", errors);
            }
            AppError::from(e)
        })?;

    state.cache.bookings.insert(booking.id, Arc::new(booking.clone())).await;
    Ok((StatusCode::CREATED, Json(BookingResponse { success: true, booking })))
}
