//! Pricing API routes

use axum::{extract::State, routing::post, Json, Router};

use super::quote::quote;
use super::requests::QuoteRequest;
use super::responses::QuoteResponse;
use crate::catalog::find_plan;
use crate::error::{AppError, Result};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/quote", post(quote_selection))
}

/// POST /api/pricing/quote
///
/// Always answers 200 for a known plan; date and headcount problems are
/// reported in `errors` so the form can show them inline.
async fn quote_selection(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let plan = find_plan(req.product, req.location, &req.plan_id)
        .ok_or_else(|| AppError::NotFound(format!("plan '{}'", req.plan_id)))?;

    let calendar = state.calendar();
    let quote = quote(plan, req.location, req.child_count, req.start_date, &calendar);

    tracing::debug!(
        plan = %plan.id,
        children = req.child_count,
        bookable = quote.is_bookable(),
        "Quoted selection"
    );

    Ok(Json(QuoteResponse::new(&plan.name, quote)))
}
