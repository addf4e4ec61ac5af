//! Plan listing endpoint

use axum::{
    extract::Path,
    routing::get,
    Json, Router,
};

use super::models::{Location, Plan, Product};
use super::plans::plans_for;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/plans/:product/:location", get(list_plans))
}

/// GET /api/plans/{product}/{location}
async fn list_plans(Path((product, location)): Path<(Product, Location)>) -> Json<Vec<Plan>> {
    Json(plans_for(product, location).to_vec())
}
