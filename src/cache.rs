//! In-memory caching using moka
//!
//! Bookings never change once paid for, so they are cached by id for the
//! booking lookup endpoint and the consent form's booking check.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::booking::Booking;

/// Application cache holding persisted bookings
#[derive(Clone)]
pub struct AppCache {
    /// Bookings (id -> Booking)
    pub bookings: Cache<Uuid, Arc<Booking>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // 1000 entries, 1 hour TTL, 15 min idle
            bookings: Cache::builder()
                .max_capacity(1_000)
                .time_to_live(Duration::from_secs(60 * 60))
                .time_to_idle(Duration::from_secs(15 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            bookings_size: self.bookings.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.bookings.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub bookings_size: u64,
}
