//! Consent form endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::models::{ConsentForm, ConsentSubmission};
use super::validation::validate_consent;
use crate::error::{AppError, Result};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/consent-forms", post(submit_consent))
        .route("/api/bookings/:id/consent-forms", get(list_consents))
}

#[derive(Debug, Serialize)]
pub struct ConsentResponse {
    pub success: bool,
    pub form: ConsentForm,
}

/// POST /api/consent-forms
async fn submit_consent(
    State(state): State<AppState>,
    Json(submission): Json<ConsentSubmission>,
) -> Result<(StatusCode, Json<ConsentResponse>)> {
    let errors = validate_consent(&submission);
    if !errors.is_empty() {
        warn!(booking = %submission.parent_booking, "Rejected consent form: {}", errors);
        return Err(AppError::Validation(errors));
    }

    let booking_id = submission.parent_booking;
    if state.booking(booking_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Booking {}", booking_id)));
    }

    let form = state.consents.insert_consent(submission).await?;
    info!(booking = %booking_id, form = %form.id, "Consent form stored");

    Ok((StatusCode::CREATED, Json(ConsentResponse { success: true, form })))
}

/// GET /api/bookings/{id}/consent-forms
async fn list_consents(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<ConsentForm>>> {
    if state.booking(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Booking {}", id)));
    }
    Ok(Json(state.consents.consents_for_booking(id).await?))
}
