//! Process-local storage used when no database is configured, and in tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingRepository, ConsentRepository, StorageError};
use crate::booking::{Booking, NewBooking};
use crate::consent::{ConsentForm, ConsentSubmission};

#[derive(Default)]
struct Tables {
    bookings: HashMap<Uuid, Booking>,
    consents: Vec<ConsentForm>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn booking_count(&self) -> usize {
        self.tables.read().await.bookings.len()
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StorageError> {
        let mut tables = self.tables.write().await;

        if tables.bookings.values().any(|b| b.payment_id == booking.payment_id) {
            return Err(StorageError::DuplicatePayment(booking.payment_id));
        }

        let booking = Booking::from_new(Uuid::new_v4(), booking, Utc::now());
        tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, StorageError> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }
}

#[async_trait]
impl ConsentRepository for MemoryStore {
    async fn insert_consent(&self, submission: ConsentSubmission) -> Result<ConsentForm, StorageError> {
        let form = ConsentForm {
            id: Uuid::new_v4(),
            submission,
            created_at: Utc::now(),
        };
        self.tables.write().await.consents.push(form.clone());
        Ok(form)
    }

    async fn consents_for_booking(&self, booking_id: Uuid) -> Result<Vec<ConsentForm>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .consents
            .iter()
            .filter(|f| f.submission.parent_booking == booking_id)
            .cloned()
            .collect())
    }
}
