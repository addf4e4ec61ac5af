//! Postgres storage.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{BookingRepository, ConsentRepository, StorageError};
use crate::booking::{Booking, NewBooking, ParentContact};
use crate::config::DatabaseConfig;
use crate::consent::{ConsentForm, ConsentSubmission};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and bring the schema up to date
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect(url)
            .await?;
        info!("Connected to database (pool size {})", config.pool_size);

        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");

        Ok(Self::new(pool))
    }
}

/// Booking row from database
#[derive(Debug, Clone, FromRow)]
struct BookingRow {
    id: Uuid,
    parent_name: String,
    parent_email: String,
    parent_phone: String,
    parent_address: String,
    product: String,
    location: String,
    plan_id: String,
    plan_name: String,
    children: serde_json::Value,
    start_date: NaiveDate,
    access: Option<serde_json::Value>,
    pricing: serde_json::Value,
    payment_id: String,
    created_at: DateTime<Utc>,
}

fn decode<T: DeserializeOwned>(id: Uuid, column: &str, value: serde_json::Value) -> Result<T, StorageError> {
    serde_json::from_value(value).map_err(|e| StorageError::Corrupt {
        id,
        reason: format!("{}: {}", column, e),
    })
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, StorageError> {
        let id = self.id;
        let corrupt = |reason: String| StorageError::Corrupt { id, reason };

        Ok(Booking {
            id,
            parent: ParentContact {
                parent_name: self.parent_name,
                parent_email: self.parent_email,
                parent_phone: self.parent_phone,
                parent_address: self.parent_address,
            },
            product: self.product.parse().map_err(corrupt)?,
            location: self.location.parse().map_err(corrupt)?,
            plan_id: self.plan_id,
            plan_name: self.plan_name,
            children: decode(id, "children", self.children)?,
            start_date: self.start_date,
            access: self.access.map(|a| decode(id, "access", a)).transpose()?,
            pricing: decode(id, "pricing", self.pricing)?,
            payment_id: self.payment_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
struct ConsentRow {
    id: Uuid,
    details: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl ConsentRow {
    fn into_form(self) -> Result<ConsentForm, StorageError> {
        Ok(ConsentForm {
            id: self.id,
            submission: decode(self.id, "details", self.details)?,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StorageError> {
        let final_total: Decimal = booking.pricing.final_total;

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (
                id, parent_name, parent_email, parent_phone, parent_address,
                product, location, plan_id, plan_name, children, start_date,
                access, pricing, final_total, currency, payment_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING
                id, parent_name, parent_email, parent_phone, parent_address,
                product, location, plan_id, plan_name, children, start_date,
                access, pricing, payment_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&booking.parent.parent_name)
        .bind(&booking.parent.parent_email)
        .bind(&booking.parent.parent_phone)
        .bind(&booking.parent.parent_address)
        .bind(booking.product.as_str())
        .bind(booking.location.as_str())
        .bind(&booking.plan_id)
        .bind(&booking.plan_name)
        .bind(Json(&booking.children))
        .bind(booking.start_date)
        .bind(booking.access.as_ref().map(Json))
        .bind(Json(&booking.pricing))
        .bind(final_total)
        .bind(&booking.pricing.currency)
        .bind(&booking.payment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::DuplicatePayment(booking.payment_id.clone())
            }
            other => StorageError::Database(other),
        })?;

        row.into_booking()
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, StorageError> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT
                id, parent_name, parent_email, parent_phone, parent_address,
                product, location, plan_id, plan_name, children, start_date,
                access, pricing, payment_id, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookingRow::into_booking).transpose()
    }
}

#[async_trait]
impl ConsentRepository for PgStore {
    async fn insert_consent(&self, submission: ConsentSubmission) -> Result<ConsentForm, StorageError> {
        let row = sqlx::query_as::<_, ConsentRow>(
            r#"
            INSERT INTO consent_forms (id, booking_id, details)
            VALUES ($1, $2, $3)
            RETURNING id, details, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(submission.parent_booking)
        .bind(Json(&submission))
        .fetch_one(&self.pool)
        .await?;

        row.into_form()
    }

    async fn consents_for_booking(&self, booking_id: Uuid) -> Result<Vec<ConsentForm>, StorageError> {
        let rows = sqlx::query_as::<_, ConsentRow>(
            r#"
            SELECT id, details, created_at
            FROM consent_forms
            WHERE booking_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ConsentRow::into_form).collect()
    }
}
