use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Booking, BookingId, BookingStatus, Listing, ListingId, Review, ReviewId};
use super::store::ListingRelations;

/// Builds absolute resource URLs for hyperlinked responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn listing(&self, id: &ListingId) -> String {
        format!("{}/listings/{}/", self.base, id)
    }

    pub fn booking(&self, id: &BookingId) -> String {
        format!("{}/bookings/{}/", self.base, id)
    }

    pub fn review(&self, id: &ReviewId) -> String {
        format!("{}/reviews/{}/", self.base, id)
    }

    /// Listing id named by a bare id, this service's listing hyperlink, or
    /// the `/listings/{id}/` path alone. Other hosts and routes do not match.
    pub fn listing_id(&self, raw: &str) -> Option<ListingId> {
        let raw = raw.trim();
        let path = match raw.strip_prefix(self.base.as_str()) {
            Some(rest) if rest.starts_with('/') => rest,
            _ if raw.starts_with('/') => raw,
            _ if raw.is_empty() || raw.contains('/') => return None,
            _ => return Some(ListingId(raw.to_string())),
        };

        let id = path.strip_prefix("/listings/")?;
        let id = id.strip_suffix('/').unwrap_or(id);
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(ListingId(id.to_string()))
    }
}

/// Listing representation linking to its bookings and reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub listing_id: ListingId,
    pub url: String,
    pub start_location: String,
    pub destination: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub bookings: Vec<String>,
    pub reviews: Vec<String>,
}

impl ListingView {
    pub fn build(listing: &Listing, relations: &ListingRelations, links: &LinkBuilder) -> Self {
        Self {
            listing_id: listing.listing_id.clone(),
            url: links.listing(&listing.listing_id),
            start_location: listing.start_location.clone(),
            destination: listing.destination.clone(),
            total_price: listing.total_price,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            bookings: relations
                .bookings
                .iter()
                .map(|id| links.booking(id))
                .collect(),
            reviews: relations.reviews.iter().map(|id| links.review(id)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    pub booking_id: BookingId,
    pub url: String,
    pub listing: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingView {
    pub fn build(booking: &Booking, links: &LinkBuilder) -> Self {
        Self {
            booking_id: booking.booking_id.clone(),
            url: links.booking(&booking.booking_id),
            listing: links.listing(&booking.listing_id),
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Reviews expose their creation time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    pub review_id: ReviewId,
    pub url: String,
    pub listing: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn build(review: &Review, links: &LinkBuilder) -> Self {
        Self {
            review_id: review.review_id.clone(),
            url: links.review(&review.review_id),
            listing: links.listing(&review.listing_id),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}
