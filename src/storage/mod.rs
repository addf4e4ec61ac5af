//! Persistence of bookings and consent forms.
//!
//! Handlers and the checkout flow only see the repository traits; the binary
//! picks Postgres when `DATABASE_URL` is set and the in-memory store otherwise.

use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, NewBooking};
use crate::consent::{ConsentForm, ConsentSubmission};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("A booking for payment {0} already exists")]
    DuplicatePayment(String),

    #[error("Stored record {id} is unreadable: {reason}")]
    Corrupt { id: Uuid, reason: String },
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a paid booking and return it with its generated id
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StorageError>;

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, StorageError>;
}

#[async_trait]
pub trait ConsentRepository: Send + Sync {
    async fn insert_consent(&self, submission: ConsentSubmission) -> Result<ConsentForm, StorageError>;

    async fn consents_for_booking(&self, booking_id: Uuid) -> Result<Vec<ConsentForm>, StorageError>;
}
