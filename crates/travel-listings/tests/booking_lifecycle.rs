//! End-to-end booking lifecycle: HTTP writes through the public router, jobs
//! flowing over the in-process channel, and workers delivering confirmation
//! mail against the shared store.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use serde_json::Value;

    use travel_listings::bookings::{DeliveryError, MailMessage, MailSettings, Mailer};

    #[derive(Default)]
    pub struct CapturingMailer {
        sent: Mutex<Vec<MailMessage>>,
    }

    impl CapturingMailer {
        pub fn sent(&self) -> Vec<MailMessage> {
            self.sent.lock().expect("mailer mutex poisoned").clone()
        }
    }

    impl Mailer for CapturingMailer {
        fn send(&self, message: &MailMessage) -> Result<(), DeliveryError> {
            self.sent
                .lock()
                .expect("mailer mutex poisoned")
                .push(message.clone());
            Ok(())
        }
    }

    pub fn settings() -> MailSettings {
        MailSettings {
            from: "no-reply@alx-travel.local".to_string(),
            recipients: vec!["ops@example.com".to_string(), "sales@example.com".to_string()],
        }
    }

    pub fn request(method: Method, uri: &str, payload: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match payload {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&payload).expect("serialize payload"),
                ))
                .expect("request builds"),
            None => builder.body(Body::empty()).expect("request builds"),
        }
    }

    pub async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    pub fn shared<T>(value: T) -> Arc<T> {
        Arc::new(value)
    }
}

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{json_body, request, settings, shared, CapturingMailer};
use travel_listings::bookings::{
    seed_sample_data, spawn_workers, travel_router, BookingStatus, ChannelJobQueue, EntityStore,
    LinkBuilder, MemoryStore, NotificationWorker, TravelService,
};

#[tokio::test]
async fn booking_confirmation_flows_from_http_to_mailer() {
    let store = shared(MemoryStore::new());
    let (queue, jobs) = ChannelJobQueue::unbounded();
    let queue = Arc::new(queue);
    let mailer = shared(CapturingMailer::default());

    let worker = Arc::new(NotificationWorker::new(
        store.clone(),
        mailer.clone(),
        settings(),
    ));
    let handles = spawn_workers(worker, jobs, 2);

    let service = TravelService::new(
        store.clone(),
        queue.clone(),
        LinkBuilder::new("http://localhost:3000"),
    );
    let router = travel_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/listings/",
            Some(json!({
                "start_location": "New York",
                "destination": "Paris",
                "total_price": "1500.00",
            })),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let listing = json_body(response).await;

    let response = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/bookings/",
            Some(json!({
                "listing": listing["url"],
                "start_date": "2024-01-15",
                "end_date": "2024-01-22",
            })),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking = json_body(response).await;
    let booking_id = booking["booking_id"]
        .as_str()
        .expect("booking id")
        .to_string();

    let response = router
        .clone()
        .oneshot(request(
            Method::PATCH,
            &format!("/bookings/{booking_id}/"),
            Some(json!({"status": "confirmed"})),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    queue.close();
    for result in futures::future::join_all(handles).await {
        result.expect("worker exits cleanly");
    }

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, format!("Booking Confirmation - {booking_id}"));
    assert!(sent[0].body.contains("Listing: New York to Paris"));
    assert_eq!(sent[0].to.len(), 2);

    let response = router
        .oneshot(request(
            Method::GET,
            &format!(
                "/listings/{}/",
                listing["listing_id"].as_str().expect("listing id")
            ),
            None,
        ))
        .await
        .expect("route executes");
    let listing = json_body(response).await;
    assert_eq!(
        listing["bookings"],
        json!([format!("http://localhost:3000/bookings/{booking_id}/")])
    );
}

#[tokio::test]
async fn seeded_data_is_served_without_notifications() {
    let store = shared(MemoryStore::new());
    let summary = seed_sample_data(store.as_ref()).expect("seed succeeds");
    let (queue, _jobs) = ChannelJobQueue::unbounded();
    let queue = Arc::new(queue);

    let service = TravelService::new(store.clone(), queue.clone(), LinkBuilder::new("http://api.test"));
    let router = travel_router(Arc::new(service));

    let response = router
        .oneshot(request(Method::GET, "/reviews/", None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let reviews = json_body(response).await;
    assert_eq!(reviews[0]["rating"], json!(5));
    assert_eq!(reviews[1]["comment"], json!("Great place, but a bit too expensive."));

    let confirmed = store
        .fetch_booking(&summary.bookings[0])
        .expect("fetch")
        .expect("present");
    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(queue.pending(), 0);
}
