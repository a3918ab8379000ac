use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Booking, BookingId, Listing, ListingId, Review, ReviewId};

/// Storage abstraction so the service can be exercised against any backend.
///
/// Implementations keep records in insertion order, reject bookings and
/// reviews whose listing does not exist, and remove a listing's bookings and
/// reviews together with the listing.
pub trait EntityStore: Send + Sync {
    fn insert_listing(&self, listing: Listing) -> Result<Listing, StoreError>;
    fn fetch_listing(&self, id: &ListingId) -> Result<Option<Listing>, StoreError>;
    fn list_listings(&self) -> Result<Vec<Listing>, StoreError>;
    fn update_listing(&self, listing: Listing) -> Result<Listing, StoreError>;
    fn delete_listing(&self, id: &ListingId) -> Result<(), StoreError>;
    fn listing_relations(&self, id: &ListingId) -> Result<ListingRelations, StoreError>;
    /// Every listing with its relations, read from one snapshot.
    fn list_listings_with_relations(&self) -> Result<Vec<(Listing, ListingRelations)>, StoreError>;

    fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError>;
    fn fetch_booking(&self, id: &BookingId) -> Result<Option<Booking>, StoreError>;
    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;
    fn update_booking(&self, booking: Booking) -> Result<Booking, StoreError>;
    fn delete_booking(&self, id: &BookingId) -> Result<(), StoreError>;

    fn insert_review(&self, review: Review) -> Result<Review, StoreError>;
    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError>;
    fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;
    fn update_review(&self, review: Review) -> Result<Review, StoreError>;
    fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("listing {0} does not exist")]
    MissingListing(ListingId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Ids of the bookings and reviews attached to a listing, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRelations {
    pub bookings: Vec<BookingId>,
    pub reviews: Vec<ReviewId>,
}

struct Table<K, V> {
    records: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Table<K, V> {
    fn insert(&mut self, key: K, value: V) -> Result<(), StoreError> {
        if self.records.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        self.order.push(key.clone());
        self.records.insert(key, value);
        Ok(())
    }

    fn get(&self, key: &K) -> Option<V> {
        self.records.get(key).cloned()
    }

    fn replace(&mut self, key: &K, value: V) -> Result<(), StoreError> {
        match self.records.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&mut self, key: &K) -> Result<V, StoreError> {
        let removed = self.records.remove(key).ok_or(StoreError::NotFound)?;
        self.order.retain(|existing| existing != key);
        Ok(removed)
    }

    fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    fn retain(&mut self, keep: impl Fn(&V) -> bool) {
        self.records.retain(|_, value| keep(value));
        let records = &self.records;
        self.order.retain(|key| records.contains_key(key));
    }
}

#[derive(Default)]
struct Tables {
    listings: Table<ListingId, Listing>,
    bookings: Table<BookingId, Booking>,
    reviews: Table<ReviewId, Review>,
}

/// In-process store. A single lock covers all three tables so cascades and
/// foreign-key checks observe a consistent snapshot.
#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl EntityStore for MemoryStore {
    fn insert_listing(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut tables = self.tables()?;
        tables
            .listings
            .insert(listing.listing_id.clone(), listing.clone())?;
        Ok(listing)
    }

    fn fetch_listing(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        Ok(self.tables()?.listings.get(id))
    }

    fn list_listings(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(self.tables()?.listings.values().cloned().collect())
    }

    fn update_listing(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut tables = self.tables()?;
        tables
            .listings
            .replace(&listing.listing_id, listing.clone())?;
        Ok(listing)
    }

    fn delete_listing(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        tables.listings.remove(id)?;
        tables.bookings.retain(|booking| &booking.listing_id != id);
        tables.reviews.retain(|review| &review.listing_id != id);
        Ok(())
    }

    fn listing_relations(&self, id: &ListingId) -> Result<ListingRelations, StoreError> {
        let tables = self.tables()?;
        if !tables.listings.contains(id) {
            return Err(StoreError::NotFound);
        }

        Ok(ListingRelations {
            bookings: tables
                .bookings
                .values()
                .filter(|booking| &booking.listing_id == id)
                .map(|booking| booking.booking_id.clone())
                .collect(),
            reviews: tables
                .reviews
                .values()
                .filter(|review| &review.listing_id == id)
                .map(|review| review.review_id.clone())
                .collect(),
        })
    }

    fn list_listings_with_relations(&self) -> Result<Vec<(Listing, ListingRelations)>, StoreError> {
        let tables = self.tables()?;
        let mut relations: HashMap<&ListingId, ListingRelations> = HashMap::new();
        for booking in tables.bookings.values() {
            relations
                .entry(&booking.listing_id)
                .or_default()
                .bookings
                .push(booking.booking_id.clone());
        }
        for review in tables.reviews.values() {
            relations
                .entry(&review.listing_id)
                .or_default()
                .reviews
                .push(review.review_id.clone());
        }

        Ok(tables
            .listings
            .values()
            .map(|listing| {
                let related = relations.remove(&listing.listing_id).unwrap_or_default();
                (listing.clone(), related)
            })
            .collect())
    }

    fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
        let mut tables = self.tables()?;
        if !tables.listings.contains(&booking.listing_id) {
            return Err(StoreError::MissingListing(booking.listing_id.clone()));
        }
        tables
            .bookings
            .insert(booking.booking_id.clone(), booking.clone())?;
        Ok(booking)
    }

    fn fetch_booking(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self.tables()?.bookings.get(id))
    }

    fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.tables()?.bookings.values().cloned().collect())
    }

    fn update_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
        let mut tables = self.tables()?;
        if !tables.listings.contains(&booking.listing_id) {
            return Err(StoreError::MissingListing(booking.listing_id.clone()));
        }
        tables
            .bookings
            .replace(&booking.booking_id, booking.clone())?;
        Ok(booking)
    }

    fn delete_booking(&self, id: &BookingId) -> Result<(), StoreError> {
        self.tables()?.bookings.remove(id).map(|_| ())
    }

    fn insert_review(&self, review: Review) -> Result<Review, StoreError> {
        let mut tables = self.tables()?;
        if !tables.listings.contains(&review.listing_id) {
            return Err(StoreError::MissingListing(review.listing_id.clone()));
        }
        tables
            .reviews
            .insert(review.review_id.clone(), review.clone())?;
        Ok(review)
    }

    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, StoreError> {
        Ok(self.tables()?.reviews.get(id))
    }

    fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.tables()?.reviews.values().cloned().collect())
    }

    fn update_review(&self, review: Review) -> Result<Review, StoreError> {
        let mut tables = self.tables()?;
        tables
            .reviews
            .replace(&review.review_id, review.clone())?;
        Ok(review)
    }

    fn delete_review(&self, id: &ReviewId) -> Result<(), StoreError> {
        self.tables()?.reviews.remove(id).map(|_| ())
    }
}
