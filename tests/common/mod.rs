#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use summercamp_web::{
    booking::{Booking, BookingDraft, ChildDetails, Gender, NewBooking, ParentContact},
    cache::AppCache,
    catalog::{Location, Product},
    clock::FixedClock,
    config::Config,
    notify::{Email, EmailNotifier, NotifyError},
    payment::{BillingDetails, CardDetails, PaymentConfirmation, PaymentError, PaymentGateway, PaymentIntent},
    pricing::CampCalendar,
    storage::{BookingRepository, MemoryStore, StorageError},
    AppState,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2026, 6, 15)
}

pub fn calendar() -> CampCalendar {
    CampCalendar::new(today(), 2026)
}

/// Three children on the Abu Dhabi 1-day plan: AED 721.88
pub fn valid_draft() -> BookingDraft {
    let child = |name: &str, dob: NaiveDate, gender: Gender| ChildDetails {
        name: name.to_string(),
        date_of_birth: Some(dob),
        gender: Some(gender),
    };
    BookingDraft {
        parent: ParentContact {
            parent_name: "Layla Hassan".into(),
            parent_email: "layla@example.com".into(),
            parent_phone: "0501234567".into(),
            parent_address: "Khalifa City, Abu Dhabi".into(),
        },
        product: Product::KidsCamp,
        location: Location::AbuDhabi,
        plan_id: Some("1-day".into()),
        children: vec![
            child("Sara", date(2016, 4, 2), Gender::Girl),
            child("Omar", date(2018, 9, 20), Gender::Boy),
            child("Noor", date(2020, 1, 11), Gender::Girl),
        ],
        start_date: Some(date(2026, 7, 6)),
        pricing: None,
    }
}

pub fn card() -> CardDetails {
    CardDetails {
        payment_method: "pm_card_visa".into(),
    }
}

pub fn billing() -> BillingDetails {
    BillingDetails {
        name: "Layla Hassan".into(),
        email: "layla@example.com".into(),
        phone: "0501234567".into(),
        address_line1: "Khalifa City".into(),
    }
}

/// Scripted gateway: approves unless told otherwise and records every call
#[derive(Default)]
pub struct FakeGateway {
    create_error: Option<PaymentError>,
    confirm_error: Option<PaymentError>,
    charge_override: Option<i64>,
    pub created: Mutex<Vec<(i64, String)>>,
    pub confirmed: Mutex<Vec<String>>,
    pub retrieved: Mutex<Vec<String>>,
    settled: Mutex<HashMap<String, i64>>,
}

impl FakeGateway {
    pub fn approving() -> Self {
        Self::default()
    }

    pub fn declining(error: PaymentError) -> Self {
        Self {
            confirm_error: Some(error),
            ..Self::default()
        }
    }

    pub fn failing_to_create(error: PaymentError) -> Self {
        Self {
            create_error: Some(error),
            ..Self::default()
        }
    }

    /// Confirms every intent but charges `amount_minor` instead of the intent amount
    pub fn charging(amount_minor: i64) -> Self {
        Self {
            charge_override: Some(amount_minor),
            ..Self::default()
        }
    }

    /// A payment the browser confirmed directly with the gateway
    pub fn settle(&self, payment_id: &str, amount_minor: i64) {
        self.settled.lock().unwrap().insert(payment_id.to_string(), amount_minor);
    }

    pub fn created_amounts(&self) -> Vec<i64> {
        self.created.lock().unwrap().iter().map(|(amount, _)| *amount).collect()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        _description: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if let Some(e) = &self.create_error {
            return Err(e.clone());
        }
        let mut created = self.created.lock().unwrap();
        created.push((amount_minor, currency.to_string()));
        let id = format!("pi_test_{}", created.len());
        Ok(PaymentIntent {
            client_secret: format!("{}_secret_abc", id),
            id,
            amount_minor,
            currency: currency.to_string(),
        })
    }

    async fn confirm(
        &self,
        client_secret: &str,
        _card: &CardDetails,
        _billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        self.confirmed.lock().unwrap().push(client_secret.to_string());
        if let Some(e) = &self.confirm_error {
            return Err(e.clone());
        }

        let id = client_secret.split("_secret_").next().unwrap_or_default().to_string();
        let intent_amount = self
            .created
            .lock()
            .unwrap()
            .last()
            .map(|(amount, _)| *amount)
            .unwrap_or_default();
        let amount_minor = self.charge_override.unwrap_or(intent_amount);
        self.settle(&id, amount_minor);
        Ok(PaymentConfirmation {
            payment_id: id,
            amount_minor,
            currency: "aed".into(),
        })
    }

    async fn retrieve(&self, payment_id: &str) -> Result<PaymentConfirmation, PaymentError> {
        self.retrieved.lock().unwrap().push(payment_id.to_string());
        let amount_minor = self
            .settled
            .lock()
            .unwrap()
            .get(payment_id)
            .copied()
            .ok_or(PaymentError::PaymentNotFound)?;
        Ok(PaymentConfirmation {
            payment_id: payment_id.to_string(),
            amount_minor,
            currency: "aed".into(),
        })
    }
}

/// Storage that is down
pub struct UnavailableBookings;

#[async_trait]
impl BookingRepository for UnavailableBookings {
    async fn insert_booking(&self, _booking: NewBooking) -> Result<Booking, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_booking(&self, _id: Uuid) -> Result<Option<Booking>, StorageError> {
        Err(StorageError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Email>>,
}

impl RecordingNotifier {
    /// Wait for background sends to land
    pub async fn wait_for(&self, count: usize) -> Vec<Email> {
        for _ in 0..100 {
            {
                let sent = self.sent.lock().unwrap();
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailNotifier for RecordingNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub struct RejectingNotifier;

#[async_trait]
impl EmailNotifier for RejectingNotifier {
    async fn send(&self, _email: &Email) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected(503))
    }
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([("CAMP_SEASON_YEAR", "2026")]);
    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub store: MemoryStore,
    pub gateway: Arc<FakeGateway>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_app(gateway: FakeGateway) -> TestApp {
    let store = MemoryStore::new();
    let gateway = Arc::new(gateway);
    let notifier = Arc::new(RecordingNotifier::default());

    let state = AppState {
        config: Arc::new(test_config()),
        cache: AppCache::new(),
        bookings: Arc::new(store.clone()),
        consents: Arc::new(store.clone()),
        gateway: gateway.clone(),
        notifier: notifier.clone(),
        clock: Arc::new(FixedClock(today())),
    };

    TestApp {
        state,
        store,
        gateway,
        notifier,
    }
}
