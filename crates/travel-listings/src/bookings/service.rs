use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{
    Booking, BookingId, BookingInput, BookingStatus, Listing, ListingId, ListingInput, Review,
    ReviewId, ReviewInput,
};
use super::notifications::{BookingTrigger, JobQueue, NotificationDispatcher};
use super::store::{EntityStore, StoreError};
use super::validation::{
    self, check_date_order, BookingChanges, ListingChanges, ListingLookup, Presence,
    ValidationErrors,
};
use super::views::{BookingView, LinkBuilder, ListingView, ReviewView};

/// PUT replaces every writable field; PATCH touches only those supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Replace,
    Partial,
}

/// Service composing validation, the entity store, and booking notifications.
pub struct TravelService<S, Q> {
    store: Arc<S>,
    dispatcher: NotificationDispatcher<Q>,
    links: LinkBuilder,
}

impl<S, Q> TravelService<S, Q>
where
    S: EntityStore + 'static,
    Q: JobQueue + 'static,
{
    pub fn new(store: Arc<S>, queue: Arc<Q>, links: LinkBuilder) -> Self {
        Self {
            store,
            dispatcher: NotificationDispatcher::new(queue),
            links,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn list_listings(&self) -> Result<Vec<ListingView>, ServiceError> {
        Ok(self
            .store
            .list_listings_with_relations()?
            .iter()
            .map(|(listing, relations)| ListingView::build(listing, relations, &self.links))
            .collect())
    }

    pub fn get_listing(&self, id: &ListingId) -> Result<ListingView, ServiceError> {
        let listing = self.store.fetch_listing(id)?.ok_or(StoreError::NotFound)?;
        self.listing_view(&listing)
    }

    pub fn create_listing(&self, input: &ListingInput) -> Result<ListingView, ServiceError> {
        let fields = validation::validate_new_listing(input)?;
        let now = Utc::now();
        let listing = Listing {
            listing_id: ListingId::generate(),
            start_location: fields.start_location,
            destination: fields.destination,
            total_price: fields.total_price,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_listing(listing)?;
        info!(listing_id = %stored.listing_id, route = %stored.route(), "listing created");
        self.listing_view(&stored)
    }

    pub fn update_listing(
        &self,
        id: &ListingId,
        input: &ListingInput,
        mode: UpdateMode,
    ) -> Result<ListingView, ServiceError> {
        let mut listing = self.store.fetch_listing(id)?.ok_or(StoreError::NotFound)?;
        let changes = match mode {
            UpdateMode::Replace => ListingChanges::from(validation::validate_new_listing(input)?),
            UpdateMode::Partial => validation::validate_listing_changes(input)?,
        };

        if let Some(start_location) = changes.start_location {
            listing.start_location = start_location;
        }
        if let Some(destination) = changes.destination {
            listing.destination = destination;
        }
        if let Some(total_price) = changes.total_price {
            listing.total_price = total_price;
        }
        listing.updated_at = refreshed(listing.updated_at);

        let stored = self.store.update_listing(listing)?;
        info!(listing_id = %stored.listing_id, ?mode, "listing updated");
        self.listing_view(&stored)
    }

    /// Removes the listing together with its bookings and reviews.
    pub fn delete_listing(&self, id: &ListingId) -> Result<(), ServiceError> {
        self.store.delete_listing(id)?;
        info!(listing_id = %id, "listing deleted");
        Ok(())
    }

    pub fn list_bookings(&self) -> Result<Vec<BookingView>, ServiceError> {
        Ok(self
            .store
            .list_bookings()?
            .iter()
            .map(|booking| BookingView::build(booking, &self.links))
            .collect())
    }

    pub fn get_booking(&self, id: &BookingId) -> Result<BookingView, ServiceError> {
        let booking = self.store.fetch_booking(id)?.ok_or(StoreError::NotFound)?;
        Ok(BookingView::build(&booking, &self.links))
    }

    /// Persist a booking; a confirmed booking schedules its confirmation e-mail.
    pub fn create_booking(&self, input: &BookingInput) -> Result<BookingView, ServiceError> {
        let lookup = self.lookup_listing(input.listing.as_ref())?;
        let fields = validation::validate_new_booking(input, &lookup)?;

        let now = Utc::now();
        let booking = Booking {
            booking_id: BookingId::generate(),
            listing_id: fields.listing_id,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: fields.status,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .store
            .insert_booking(booking)
            .map_err(listing_write_error)?;
        info!(
            booking_id = %stored.booking_id,
            listing_id = %stored.listing_id,
            status = %stored.status,
            "booking created"
        );

        if stored.status == BookingStatus::Confirmed {
            self.notify(&stored.booking_id, BookingTrigger::Created);
        }
        Ok(BookingView::build(&stored, &self.links))
    }

    /// Apply changes to a booking. Every write that leaves the booking
    /// confirmed schedules another e-mail, including repeated confirmations.
    pub fn update_booking(
        &self,
        id: &BookingId,
        input: &BookingInput,
        mode: UpdateMode,
    ) -> Result<BookingView, ServiceError> {
        let mut booking = self.store.fetch_booking(id)?.ok_or(StoreError::NotFound)?;
        let lookup = self.lookup_listing(input.listing.as_ref())?;

        let changes = match mode {
            UpdateMode::Replace => {
                let mut changes =
                    BookingChanges::from(validation::validate_new_booking(input, &lookup)?);
                // an omitted status keeps the stored one
                if input.status.is_none() {
                    changes.status = None;
                }
                changes
            }
            UpdateMode::Partial => validation::validate_booking_changes(input, &lookup)?,
        };

        if let Some(listing_id) = changes.listing_id {
            booking.listing_id = listing_id;
        }
        if let Some(start_date) = changes.start_date {
            booking.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            booking.end_date = end_date;
        }
        if let Some(status) = changes.status {
            booking.status = status;
        }
        check_date_order(booking.start_date, booking.end_date)?;
        booking.updated_at = refreshed(booking.updated_at);

        let stored = self
            .store
            .update_booking(booking)
            .map_err(listing_write_error)?;
        info!(booking_id = %stored.booking_id, status = %stored.status, ?mode, "booking updated");

        if stored.status == BookingStatus::Confirmed {
            self.notify(&stored.booking_id, BookingTrigger::Confirmed);
        }
        Ok(BookingView::build(&stored, &self.links))
    }

    pub fn delete_booking(&self, id: &BookingId) -> Result<(), ServiceError> {
        self.store.delete_booking(id)?;
        info!(booking_id = %id, "booking deleted");
        Ok(())
    }

    pub fn list_reviews(&self) -> Result<Vec<ReviewView>, ServiceError> {
        Ok(self
            .store
            .list_reviews()?
            .iter()
            .map(|review| ReviewView::build(review, &self.links))
            .collect())
    }

    pub fn get_review(&self, id: &ReviewId) -> Result<ReviewView, ServiceError> {
        let review = self.store.fetch_review(id)?.ok_or(StoreError::NotFound)?;
        Ok(ReviewView::build(&review, &self.links))
    }

    pub fn create_review(&self, input: &ReviewInput) -> Result<ReviewView, ServiceError> {
        let lookup = self.lookup_listing(input.listing.as_ref())?;
        let fields = validation::validate_new_review(input, &lookup)?;

        let now = Utc::now();
        let review = Review {
            review_id: ReviewId::generate(),
            listing_id: fields.listing_id,
            rating: fields.rating,
            comment: fields.comment,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .store
            .insert_review(review)
            .map_err(listing_write_error)?;
        info!(review_id = %stored.review_id, listing_id = %stored.listing_id, rating = stored.rating, "review created");
        Ok(ReviewView::build(&stored, &self.links))
    }

    /// Only rating and comment change; the listing stays fixed.
    pub fn update_review(
        &self,
        id: &ReviewId,
        input: &ReviewInput,
        mode: UpdateMode,
    ) -> Result<ReviewView, ServiceError> {
        let mut review = self.store.fetch_review(id)?.ok_or(StoreError::NotFound)?;
        let presence = match mode {
            UpdateMode::Replace => Presence::Required,
            UpdateMode::Partial => Presence::Optional,
        };
        let changes = validation::validate_review_changes(input, presence)?;

        if let Some(rating) = changes.rating {
            review.rating = rating;
        }
        if let Some(comment) = changes.comment {
            review.comment = comment;
        }
        review.updated_at = refreshed(review.updated_at);

        let stored = self.store.update_review(review)?;
        info!(review_id = %stored.review_id, ?mode, "review updated");
        Ok(ReviewView::build(&stored, &self.links))
    }

    pub fn delete_review(&self, id: &ReviewId) -> Result<(), ServiceError> {
        self.store.delete_review(id)?;
        info!(review_id = %id, "review deleted");
        Ok(())
    }

    fn listing_view(&self, listing: &Listing) -> Result<ListingView, ServiceError> {
        let relations = self.store.listing_relations(&listing.listing_id)?;
        Ok(ListingView::build(listing, &relations, &self.links))
    }

    /// Resolve a listing reference against this service's routes and the store.
    /// Non-string references are left to validation to report.
    fn lookup_listing(&self, raw: Option<&Value>) -> Result<ListingLookup, ServiceError> {
        let Some(id) = raw
            .and_then(Value::as_str)
            .and_then(|reference| self.links.listing_id(reference))
        else {
            return Ok(ListingLookup::Unmatched);
        };
        Ok(match self.store.fetch_listing(&id)? {
            Some(listing) => ListingLookup::Found(listing.listing_id),
            None => ListingLookup::Missing,
        })
    }

    fn notify(&self, booking_id: &BookingId, trigger: BookingTrigger) {
        if let Err(error) = self.dispatcher.on_booking_event(booking_id, trigger) {
            warn!(booking_id = %booking_id, ?trigger, %error, "failed to enqueue booking confirmation");
        }
    }
}

/// `updated_at` never moves backwards, even if the wall clock does.
fn refreshed(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

/// The listing vanished between validation and the write.
fn listing_write_error(error: StoreError) -> ServiceError {
    match error {
        StoreError::MissingListing(_) => {
            ValidationErrors::single("listing", validation::NO_SUCH_LISTING).into()
        }
        other => other.into(),
    }
}

/// Error raised by the travel service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}
