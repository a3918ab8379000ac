//! Sample data for local runs and the demo command.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::domain::{Booking, BookingId, BookingStatus, Listing, ListingId, Review, ReviewId};
use super::store::{EntityStore, StoreError};

/// Ids of the records created by [`seed_sample_data`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub listings: Vec<ListingId>,
    pub bookings: Vec<BookingId>,
    pub reviews: Vec<ReviewId>,
}

struct SampleTrip {
    start_location: &'static str,
    destination: &'static str,
    price_cents: i64,
    stay: ((i32, u32, u32), (i32, u32, u32)),
    status: BookingStatus,
    rating: u8,
    comment: &'static str,
}

const SAMPLE_TRIPS: [SampleTrip; 2] = [
    SampleTrip {
        start_location: "New York",
        destination: "Paris",
        price_cents: 150_000,
        stay: ((2024, 1, 15), (2024, 1, 22)),
        status: BookingStatus::Confirmed,
        rating: 5,
        comment: "Fantastic experience!",
    },
    SampleTrip {
        start_location: "London",
        destination: "Tokyo",
        price_cents: 200_000,
        stay: ((2024, 2, 10), (2024, 2, 17)),
        status: BookingStatus::Pending,
        rating: 4,
        comment: "Great place, but a bit too expensive.",
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, StoreError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| StoreError::Unavailable(format!("invalid sample date {year}-{month}-{day}")))
}

/// Insert two listings with one booking and one review each.
///
/// Records go straight to the store, so no confirmation e-mails are queued.
pub fn seed_sample_data<S: EntityStore>(store: &S) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary::default();

    for trip in &SAMPLE_TRIPS {
        let now = Utc::now();
        let listing = store.insert_listing(Listing {
            listing_id: ListingId::generate(),
            start_location: trip.start_location.to_string(),
            destination: trip.destination.to_string(),
            total_price: Decimal::new(trip.price_cents, 2),
            created_at: now,
            updated_at: now,
        })?;

        let booking = store.insert_booking(Booking {
            booking_id: BookingId::generate(),
            listing_id: listing.listing_id.clone(),
            start_date: date(trip.stay.0)?,
            end_date: date(trip.stay.1)?,
            status: trip.status,
            created_at: now,
            updated_at: now,
        })?;

        let review = store.insert_review(Review {
            review_id: ReviewId::generate(),
            listing_id: listing.listing_id.clone(),
            rating: trip.rating,
            comment: trip.comment.to_string(),
            created_at: now,
            updated_at: now,
        })?;

        info!(listing_id = %listing.listing_id, route = %listing.route(), "seeded sample listing");
        summary.listings.push(listing.listing_id);
        summary.bookings.push(booking.booking_id);
        summary.reviews.push(review.review_id);
    }

    Ok(summary)
}
