use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh 36-character UUID string.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(
    /// Identifier wrapper for travel listings.
    ListingId
);
record_id!(
    /// Identifier wrapper for bookings.
    BookingId
);
record_id!(
    /// Identifier wrapper for reviews.
    ReviewId
);

/// A travel offering (route + price) that bookings and reviews attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: ListingId,
    pub start_location: String,
    pub destination: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn route(&self) -> String {
        format!("{} to {}", self.start_location, self.destination)
    }
}

/// Lifecycle of a booking. New bookings start out pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::Pending, Self::Confirmed, Self::Canceled];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == raw.trim())
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reservation against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub listing_id: ListingId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rating and comment left against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub listing_id: ListingId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Keeps an explicit `null` distinct from an omitted field: omitted stays
/// `None`, `null` becomes `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Raw listing payload as received over the wire. Fields stay untyped until
/// validation so type errors are reported per field. Read-only fields present
/// in the body (ids, links, timestamps) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingInput {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub destination: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Value>,
}

/// Raw booking payload. `listing` accepts the listing hyperlink or its bare id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingInput {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub listing: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

/// Raw review payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub listing: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_strings() {
        let first = ListingId::generate();
        let second = ListingId::generate();
        assert_eq!(first.as_str().len(), 36);
        assert_ne!(first, second);
    }

    #[test]
    fn status_parses_known_labels_only() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse(" canceled "), Some(BookingStatus::Canceled));
        assert_eq!(BookingStatus::parse("cancelled"), None);
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn inputs_keep_null_apart_from_omitted() {
        let input: ReviewInput =
            serde_json::from_str(r#"{"comment": null, "rating": "5"}"#).expect("parses");
        assert_eq!(input.comment, Some(Value::Null));
        assert_eq!(input.rating, Some(Value::String("5".to_string())));
        assert!(input.listing.is_none());
    }
}
