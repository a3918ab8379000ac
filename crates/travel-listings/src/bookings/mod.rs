//! Listings, bookings, and reviews: storage, validation, HTTP views, and the
//! booking confirmation notification pipeline.

pub mod domain;
pub mod notifications;
pub mod router;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Booking, BookingId, BookingInput, BookingStatus, Listing, ListingId, ListingInput, Review,
    ReviewId, ReviewInput,
};
pub use notifications::{
    spawn_workers, BookingTrigger, ChannelJobQueue, DeliveryError, Job, JobKind, JobQueue,
    LogMailer, MailMessage, MailSettings, Mailer, NotificationDispatcher, NotificationWorker,
    QueueError, WorkerError,
};
pub use router::{travel_router, ApiError};
pub use seed::{seed_sample_data, SeedSummary};
pub use service::{ServiceError, TravelService, UpdateMode};
pub use store::{EntityStore, ListingRelations, MemoryStore, StoreError};
pub use validation::{ListingLookup, ValidationError, ValidationErrors};
pub use views::{BookingView, LinkBuilder, ListingView, ReviewView};
