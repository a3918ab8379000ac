use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::bookings::domain::{
    Booking, BookingId, BookingInput, BookingStatus, Listing, ListingId, ListingInput, Review,
    ReviewId, ReviewInput,
};
use crate::bookings::notifications::{
    DeliveryError, Job, JobQueue, MailMessage, MailSettings, Mailer, QueueError,
};
use crate::bookings::store::{EntityStore, ListingRelations, MemoryStore, StoreError};
use crate::bookings::views::LinkBuilder;
use crate::bookings::{travel_router, TravelService};

pub(super) const BASE_URL: &str = "http://api.test";

pub(super) fn links() -> LinkBuilder {
    LinkBuilder::new(BASE_URL)
}

pub(super) fn listing_input(start: &str, destination: &str, price: &str) -> ListingInput {
    ListingInput {
        start_location: Some(json!(start)),
        destination: Some(json!(destination)),
        total_price: Some(json!(price)),
    }
}

pub(super) fn booking_input(listing: &ListingId, status: Option<&str>) -> BookingInput {
    BookingInput {
        listing: Some(json!(listing.as_str())),
        start_date: Some(json!("2024-01-15")),
        end_date: Some(json!("2024-01-22")),
        status: status.map(|status| json!(status)),
    }
}

pub(super) fn review_input(listing: &ListingId, rating: i64) -> ReviewInput {
    ReviewInput {
        listing: Some(json!(listing.as_str())),
        rating: Some(json!(rating)),
        comment: Some(json!("Fantastic experience!")),
    }
}

pub(super) fn stored_listing() -> Listing {
    let now = Utc::now();
    Listing {
        listing_id: ListingId::generate(),
        start_location: "New York".to_string(),
        destination: "Paris".to_string(),
        total_price: Decimal::new(150_000, 2),
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn stored_booking(listing: &ListingId, status: BookingStatus) -> Booking {
    let now = Utc::now();
    Booking {
        booking_id: BookingId::generate(),
        listing_id: listing.clone(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date"),
        status,
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn stored_review(listing: &ListingId) -> Review {
    let now = Utc::now();
    Review {
        review_id: ReviewId::generate(),
        listing_id: listing.clone(),
        rating: 4,
        comment: "Great place, but a bit too expensive.".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn mail_settings() -> MailSettings {
    MailSettings {
        from: "no-reply@alx-travel.local".to_string(),
        recipients: vec!["bookings@alx-travel.local".to_string()],
    }
}

pub(super) type TestService = TravelService<MemoryStore, RecordingQueue>;

pub(super) fn build_service() -> (TestService, Arc<MemoryStore>, Arc<RecordingQueue>) {
    let store = Arc::new(MemoryStore::new());
    let queue = Arc::new(RecordingQueue::default());
    let service = TravelService::new(store.clone(), queue.clone(), links());
    (service, store, queue)
}

pub(super) fn build_router() -> (axum::Router, Arc<MemoryStore>, Arc<RecordingQueue>) {
    let (service, store, queue) = build_service();
    (travel_router(Arc::new(service)), store, queue)
}

#[derive(Default)]
pub(super) struct RecordingQueue {
    jobs: Mutex<Vec<Job>>,
}

impl RecordingQueue {
    pub(super) fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().expect("queue mutex poisoned").clone()
    }
}

impl JobQueue for RecordingQueue {
    fn enqueue(&self, job: Job) -> Result<(), QueueError> {
        self.jobs.lock().expect("queue mutex poisoned").push(job);
        Ok(())
    }
}

pub(super) struct FailingQueue;

impl JobQueue for FailingQueue {
    fn enqueue(&self, _job: Job) -> Result<(), QueueError> {
        Err(QueueError::Unavailable("broker offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl CapturingMailer {
    pub(super) fn sent(&self) -> Vec<MailMessage> {
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

pub(super) struct RejectingMailer;

impl Mailer for RejectingMailer {
    fn send(&self, _message: &MailMessage) -> Result<(), DeliveryError> {
        Err(DeliveryError::Rejected("550 relay denied".to_string()))
    }
}

pub(super) struct UnavailableStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

impl EntityStore for UnavailableStore {
    fn insert_listing(&self, _listing: Listing) -> Result<Listing, StoreError> {
        offline()
    }

    fn fetch_listing(&self, _id: &ListingId) -> Result<Option<Listing>, StoreError> {
        offline()
    }

    fn list_listings(&self) -> Result<Vec<Listing>, StoreError> {
        offline()
    }

    fn update_listing(&self, _listing: Listing) -> Result<Listing, StoreError> {
        offline()
    }

    fn delete_listing(&self, _id: &ListingId) -> Result<(), StoreError> {
        offline()
    }

    fn listing_relations(&self, _id: &ListingId) -> Result<ListingRelations, StoreError> {
        offline()
    }

    fn list_listings_with_relations(&self) -> Result<Vec<(Listing, ListingRelations)>, StoreError> {
        offline()
    }

    fn insert_booking(&self, _booking: Booking) -> Result<Booking, StoreError> {
        offline()
    }

    fn fetch_booking(&self, _id: &BookingId) -> Result<Option<Booking>, StoreError> {
        offline()
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        offline()
    }

    fn update_booking(&self, _booking: Booking) -> Result<Booking, StoreError> {
        offline()
    }

    fn delete_booking(&self, _id: &BookingId) -> Result<(), StoreError> {
        offline()
    }

    fn insert_review(&self, _review: Review) -> Result<Review, StoreError> {
        offline()
    }

    fn fetch_review(&self, _id: &ReviewId) -> Result<Option<Review>, StoreError> {
        offline()
    }

    fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        offline()
    }

    fn update_review(&self, _review: Review) -> Result<Review, StoreError> {
        offline()
    }

    fn delete_review(&self, _id: &ReviewId) -> Result<(), StoreError> {
        offline()
    }
}

pub(super) fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

pub(super) fn raw_json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

pub(super) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
