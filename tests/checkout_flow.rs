mod common;

use rust_decimal_macros::dec;
use std::sync::Arc;

use common::*;
use summercamp_web::{
    booking::{CheckoutError, CheckoutService},
    payment::PaymentError,
    storage::BookingRepository,
};

#[tokio::test]
async fn test_successful_checkout_charges_server_total_and_saves_booking() {
    let app = test_app(FakeGateway::approving());

    let booking = app
        .state
        .checkout()
        .checkout(&valid_draft(), &card(), &billing(), &calendar())
        .await
        .unwrap();

    assert_eq!(app.gateway.created_amounts(), vec![72188]);
    assert_eq!(booking.payment_id, "pi_test_1");
    assert_eq!(booking.pricing.final_total, dec!(721.88));
    assert_eq!(booking.children.len(), 3);
    assert_eq!(booking.plan_name, "1-Day Access");

    let stored = app.store.find_booking(booking.id).await.unwrap();
    assert_eq!(stored, Some(booking.clone()));

    let sent = app.notifier.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "layla@example.com");
    assert!(sent[0].text.contains("Sara, Omar and Noor"));
}

#[tokio::test]
async fn test_client_supplied_pricing_is_ignored() {
    let app = test_app(FakeGateway::approving());
    let mut draft = valid_draft();
    let mut tampered = summercamp_web::pricing::calculate_pricing(dec!(1), 3).unwrap();
    tampered.final_total = dec!(1);
    draft.pricing = Some(tampered);

    let pending = app.state.checkout().start(&draft, &calendar()).await.unwrap();
    assert_eq!(pending.intent.amount_minor, 72188);
}

#[tokio::test]
async fn test_declined_card_persists_nothing() {
    let app = test_app(FakeGateway::declining(PaymentError::InsufficientFunds));

    let err = app
        .state
        .checkout()
        .checkout(&valid_draft(), &card(), &billing(), &calendar())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Payment(PaymentError::InsufficientFunds)));
    assert_eq!(app.store.booking_count().await, 0);
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_gateway() {
    let app = test_app(FakeGateway::approving());
    let mut draft = valid_draft();
    draft.start_date = Some(date(2026, 7, 4));

    let err = app
        .state
        .checkout()
        .checkout(&draft, &card(), &billing(), &calendar())
        .await
        .unwrap_err();

    match err {
        CheckoutError::Validation(errors) => {
            assert_eq!(errors.get("startDate"), Some("Camp in Abu Dhabi runs Monday to Friday"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(app.gateway.created_amounts().is_empty());
}

#[tokio::test]
async fn test_gateway_outage_on_intent_creation() {
    let app = test_app(FakeGateway::failing_to_create(PaymentError::Unavailable("timed out".into())));

    let err = app.state.checkout().start(&valid_draft(), &calendar()).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Payment(PaymentError::Unavailable(_))));
    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_storage_failure_after_payment_is_distinct() {
    let gateway = Arc::new(FakeGateway::approving());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = CheckoutService::new(gateway.clone(), Arc::new(UnavailableBookings), notifier.clone(), "aed");

    let err = service
        .checkout(&valid_draft(), &card(), &billing(), &calendar())
        .await
        .unwrap_err();

    match err {
        CheckoutError::PaymentCapturedNotSaved { payment_id, .. } => assert_eq!(payment_id, "pi_test_1"),
        other => panic!("expected captured-not-saved, got {:?}", other),
    }
    assert_eq!(gateway.confirmed.lock().unwrap().len(), 1);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_email_failure_does_not_affect_booking() {
    let app = test_app(FakeGateway::approving());
    let service = CheckoutService::new(
        app.gateway.clone(),
        app.state.bookings.clone(),
        Arc::new(RejectingNotifier),
        "aed",
    );

    let booking = service
        .checkout(&valid_draft(), &card(), &billing(), &calendar())
        .await
        .unwrap();

    assert_eq!(app.store.booking_count().await, 1);
    assert_eq!(booking.pricing.final_total, dec!(721.88));
}

#[tokio::test]
async fn test_same_draft_prices_identically_twice() {
    let app = test_app(FakeGateway::approving());
    let service = app.state.checkout();

    let first = service.start(&valid_draft(), &calendar()).await.unwrap();
    let second = service.start(&valid_draft(), &calendar()).await.unwrap();

    assert_eq!(first.booking.pricing, second.booking.pricing);
    assert_eq!(app.gateway.created_amounts(), vec![72188, 72188]);
}

#[tokio::test]
async fn test_charge_for_wrong_amount_is_not_booked() {
    let app = test_app(FakeGateway::charging(100));
    let service = app.state.checkout();

    let err = service
        .checkout(&valid_draft(), &card(), &billing(), &calendar())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::Payment(PaymentError::AmountMismatch {
            expected: 72188,
            charged: 100
        })
    ));
    assert_eq!(app.store.booking_count().await, 0);
    assert!(app.notifier.sent.lock().unwrap().is_empty());
}
