//! Booking backend for the Summer Camp kids camp and football clinic.

pub mod booking;
pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod consent;
pub mod error;
pub mod notify;
pub mod payment;
pub mod pricing;
pub mod storage;
pub mod validation;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Datelike;
use std::sync::Arc;
use uuid::Uuid;

use booking::{Booking, CheckoutService};
use cache::{AppCache, CacheStats};
use clock::Clock;
use config::Config;
use notify::EmailNotifier;
use payment::PaymentGateway;
use pricing::CampCalendar;
use storage::{BookingRepository, ConsentRepository, StorageError};

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: AppCache,
    pub bookings: Arc<dyn BookingRepository>,
    pub consents: Arc<dyn ConsentRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn EmailNotifier>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Today's date and the season on sale
    pub fn calendar(&self) -> CampCalendar {
        let today = self.clock.today();
        let season = self.config.camp.season_year.unwrap_or_else(|| today.year());
        CampCalendar::new(today, season)
    }

    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(
            self.gateway.clone(),
            self.bookings.clone(),
            self.notifier.clone(),
            self.config.payment.currency.clone(),
        )
    }

    /// Look up a booking, going through the cache
    pub async fn booking(&self, id: Uuid) -> Result<Option<Arc<Booking>>, StorageError> {
        if let Some(cached) = self.cache.bookings.get(&id).await {
            tracing::debug!("Cache HIT for booking: {}", id);
            return Ok(Some(cached));
        }

        tracing::debug!("Cache MISS for booking: {}", id);
        let Some(booking) = self.bookings.find_booking(id).await? else {
            return Ok(None);
        };
        let booking = Arc::new(booking);
        self.cache.bookings.insert(id, booking.clone()).await;
        Ok(Some(booking))
    }
}

/// All HTTP routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/cache/stats", get(cache_stats))
        .merge(catalog::router())
        .merge(pricing::router())
        .merge(booking::router())
        .merge(consent::router())
        .with_state(state)
}

/// GET /api/cache/stats
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
