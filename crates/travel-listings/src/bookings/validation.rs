//! Field-level checks run before any store mutation.
//!
//! Every failing field is reported at once so clients can correct a payload
//! in a single round trip. Inputs arrive as raw JSON values so a wrongly typed
//! field is reported against that field rather than failing the whole body.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::domain::{BookingInput, BookingStatus, ListingId, ListingInput, ReviewInput};

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const BLANK: &str = "This field may not be blank.";
pub(crate) const NULL: &str = "This field may not be null.";
pub(crate) const NO_SUCH_LISTING: &str = "Invalid hyperlink - Object does not exist.";
pub(crate) const NO_URL_MATCH: &str = "Invalid hyperlink - No URL match.";
pub(crate) const NOT_AN_INTEGER: &str = "A valid integer is required.";
pub(crate) const NOT_A_NUMBER: &str = "A valid number is required.";
const NOT_A_STRING: &str = "Not a valid string.";
const DATE_FORMAT_HINT: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const MAX_TEXT_CHARS: usize = 255;
const MAX_PRICE_PLACES: u32 = 2;
const MAX_PRICE_WHOLE_DIGITS: u32 = 8;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

/// Non-empty set of field failures for one candidate record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {}", field_names(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn field_names(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.field)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn single(field: &'static str, reason: impl Into<String>) -> Self {
        Self(vec![ValidationError {
            field,
            reason: reason.into(),
        }])
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    pub fn reasons_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.reason.as_str())
            .collect()
    }

    /// Wire shape: `{field: [reason, ...]}`.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut grouped: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.0 {
            grouped
                .entry(error.field)
                .or_default()
                .push(error.reason.clone());
        }
        grouped
    }
}

/// Whether absent fields are an error (create, PUT) or left untouched (PATCH).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Outcome of resolving a listing reference against the routes and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLookup {
    /// Not a listing hyperlink or id this service serves.
    Unmatched,
    /// Well-formed, but no such listing is stored.
    Missing,
    Found(ListingId),
}

#[derive(Default)]
struct Collector {
    errors: Vec<ValidationError>,
}

impl Collector {
    fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.errors.push(ValidationError {
            field,
            reason: reason.into(),
        });
    }

    /// Absent fields fail only when required; `null` always fails.
    fn present<'a>(
        &mut self,
        field: &'static str,
        value: Option<&'a Value>,
        presence: Presence,
    ) -> Option<&'a Value> {
        match value {
            None => {
                if presence == Presence::Required {
                    self.push(field, REQUIRED);
                }
                None
            }
            Some(Value::Null) => {
                self.push(field, NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn text(
        &mut self,
        field: &'static str,
        value: Option<&Value>,
        presence: Presence,
        max_chars: Option<usize>,
    ) -> Option<String> {
        let raw = match self.present(field, value, presence)? {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            _ => {
                self.push(field, NOT_A_STRING);
                return None;
            }
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.push(field, BLANK);
            return None;
        }
        if let Some(limit) = max_chars {
            if trimmed.chars().count() > limit {
                self.push(
                    field,
                    format!("Ensure this field has no more than {limit} characters."),
                );
                return None;
            }
        }
        Some(trimmed.to_string())
    }

    fn date(&mut self, field: &'static str, value: Option<&Value>, presence: Presence) -> Option<NaiveDate> {
        let parsed = match self.present(field, value, presence)? {
            Value::String(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.push(field, DATE_FORMAT_HINT);
        }
        parsed
    }

    fn integer(&mut self, field: &'static str, value: Option<&Value>, presence: Presence) -> Option<i64> {
        let parsed = match self.present(field, value, presence)? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(raw) => parse_integer(raw),
            _ => None,
        };
        if parsed.is_none() {
            self.push(field, NOT_AN_INTEGER);
        }
        parsed
    }

    fn decimal(&mut self, field: &'static str, value: Option<&Value>, presence: Presence) -> Option<Decimal> {
        let parsed = match self.present(field, value, presence)? {
            Value::Number(number) => parse_decimal(&number.to_string()),
            Value::String(raw) => parse_decimal(raw),
            _ => None,
        };
        if parsed.is_none() {
            self.push(field, NOT_A_NUMBER);
        }
        parsed
    }

    fn listing(
        &mut self,
        value: Option<&Value>,
        presence: Presence,
        lookup: &ListingLookup,
    ) -> Option<ListingId> {
        match self.present("listing", value, presence)? {
            Value::String(_) => {}
            other => {
                self.push(
                    "listing",
                    format!("Incorrect type. Expected URL string, received {}.", json_type(other)),
                );
                return None;
            }
        }
        match lookup {
            ListingLookup::Unmatched => {
                self.push("listing", NO_URL_MATCH);
                None
            }
            ListingLookup::Missing => {
                self.push("listing", NO_SUCH_LISTING);
                None
            }
            ListingLookup::Found(id) => Some(id.clone()),
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.errors)
    }
}

/// Integers may arrive as strings, with a zero fraction allowed (`"5"`, `"5.0"`).
fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let whole = match trimmed.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return None,
        None => trimmed,
    };
    whole.parse().ok()
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Validated fields for a complete listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub start_location: String,
    pub destination: String,
    pub total_price: Decimal,
}

/// Validated subset of listing fields to merge into a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingChanges {
    pub start_location: Option<String>,
    pub destination: Option<String>,
    pub total_price: Option<Decimal>,
}

impl From<NewListing> for ListingChanges {
    fn from(value: NewListing) -> Self {
        Self {
            start_location: Some(value.start_location),
            destination: Some(value.destination),
            total_price: Some(value.total_price),
        }
    }
}

fn check_price(errors: &mut Collector, value: Option<&Value>, presence: Presence) -> Option<Decimal> {
    let price = errors.decimal("total_price", value, presence)?;
    let mut valid = true;

    if price < Decimal::ZERO {
        errors.push(
            "total_price",
            "Ensure this value is greater than or equal to 0.",
        );
        valid = false;
    }

    let mut normalized = price.normalize();
    if normalized.scale() > MAX_PRICE_PLACES {
        errors.push(
            "total_price",
            format!("Ensure that there are no more than {MAX_PRICE_PLACES} decimal places."),
        );
        valid = false;
    }

    if price.abs().trunc() >= Decimal::from(10_i64.pow(MAX_PRICE_WHOLE_DIGITS)) {
        errors.push(
            "total_price",
            format!(
                "Ensure that there are no more than {MAX_PRICE_WHOLE_DIGITS} digits before the decimal point."
            ),
        );
        valid = false;
    }

    if !valid {
        return None;
    }
    normalized.rescale(MAX_PRICE_PLACES);
    Some(normalized)
}

fn check_listing(
    errors: &mut Collector,
    input: &ListingInput,
    presence: Presence,
) -> ListingChanges {
    ListingChanges {
        start_location: errors.text(
            "start_location",
            input.start_location.as_ref(),
            presence,
            Some(MAX_TEXT_CHARS),
        ),
        destination: errors.text(
            "destination",
            input.destination.as_ref(),
            presence,
            Some(MAX_TEXT_CHARS),
        ),
        total_price: check_price(errors, input.total_price.as_ref(), presence),
    }
}

pub fn validate_new_listing(input: &ListingInput) -> Result<NewListing, ValidationErrors> {
    let mut errors = Collector::default();
    let changes = check_listing(&mut errors, input, Presence::Required);

    let (Some(start_location), Some(destination), Some(total_price)) =
        (changes.start_location, changes.destination, changes.total_price)
    else {
        return Err(errors.into_errors());
    };
    errors.finish()?;

    Ok(NewListing {
        start_location,
        destination,
        total_price,
    })
}

pub fn validate_listing_changes(input: &ListingInput) -> Result<ListingChanges, ValidationErrors> {
    let mut errors = Collector::default();
    let changes = check_listing(&mut errors, input, Presence::Optional);
    errors.finish()?;
    Ok(changes)
}

/// Validated fields for a complete booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub listing_id: ListingId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingChanges {
    pub listing_id: Option<ListingId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

impl From<NewBooking> for BookingChanges {
    fn from(value: NewBooking) -> Self {
        Self {
            listing_id: Some(value.listing_id),
            start_date: Some(value.start_date),
            end_date: Some(value.end_date),
            status: Some(value.status),
        }
    }
}

fn check_status(errors: &mut Collector, value: Option<&Value>) -> Option<BookingStatus> {
    let raw = match errors.present("status", value, Presence::Optional)? {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    match BookingStatus::parse(&raw) {
        Some(status) => Some(status),
        None => {
            errors.push("status", format!("\"{raw}\" is not a valid choice."));
            None
        }
    }
}

fn check_booking(
    errors: &mut Collector,
    input: &BookingInput,
    presence: Presence,
    lookup: &ListingLookup,
) -> BookingChanges {
    let changes = BookingChanges {
        listing_id: errors.listing(input.listing.as_ref(), presence, lookup),
        start_date: errors.date("start_date", input.start_date.as_ref(), presence),
        end_date: errors.date("end_date", input.end_date.as_ref(), presence),
        status: check_status(errors, input.status.as_ref()),
    };

    if let (Some(start), Some(end)) = (changes.start_date, changes.end_date) {
        if let Err(order) = check_date_order(start, end) {
            errors.errors.extend(order.0);
        }
    }
    changes
}

/// Bookings may not end before they start.
pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationErrors> {
    if end < start {
        return Err(ValidationErrors::single(
            "end_date",
            "End date must not precede start date.",
        ));
    }
    Ok(())
}

pub fn validate_new_booking(
    input: &BookingInput,
    lookup: &ListingLookup,
) -> Result<NewBooking, ValidationErrors> {
    let mut errors = Collector::default();
    let changes = check_booking(&mut errors, input, Presence::Required, lookup);

    let (Some(listing_id), Some(start_date), Some(end_date)) =
        (changes.listing_id, changes.start_date, changes.end_date)
    else {
        return Err(errors.into_errors());
    };
    errors.finish()?;

    Ok(NewBooking {
        listing_id,
        start_date,
        end_date,
        status: changes.status.unwrap_or_default(),
    })
}

pub fn validate_booking_changes(
    input: &BookingInput,
    lookup: &ListingLookup,
) -> Result<BookingChanges, ValidationErrors> {
    let mut errors = Collector::default();
    let changes = check_booking(&mut errors, input, Presence::Optional, lookup);
    errors.finish()?;
    Ok(changes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub listing_id: ListingId,
    pub rating: u8,
    pub comment: String,
}

/// Reviews keep their listing after creation; only the feedback changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

fn check_rating(errors: &mut Collector, value: Option<&Value>, presence: Presence) -> Option<u8> {
    let rating = errors.integer("rating", value, presence)?;
    if rating < 1 {
        errors.push("rating", "Ensure this value is greater than or equal to 1.");
        return None;
    }
    if rating > 5 {
        errors.push("rating", "Ensure this value is less than or equal to 5.");
        return None;
    }
    u8::try_from(rating).ok()
}

pub fn validate_new_review(
    input: &ReviewInput,
    lookup: &ListingLookup,
) -> Result<NewReview, ValidationErrors> {
    let mut errors = Collector::default();
    let listing_id = errors.listing(input.listing.as_ref(), Presence::Required, lookup);
    let rating = check_rating(&mut errors, input.rating.as_ref(), Presence::Required);
    let comment = errors.text("comment", input.comment.as_ref(), Presence::Required, None);

    let (Some(listing_id), Some(rating), Some(comment)) = (listing_id, rating, comment) else {
        return Err(errors.into_errors());
    };
    errors.finish()?;

    Ok(NewReview {
        listing_id,
        rating,
        comment,
    })
}

pub fn validate_review_changes(
    input: &ReviewInput,
    presence: Presence,
) -> Result<ReviewChanges, ValidationErrors> {
    let mut errors = Collector::default();
    let changes = ReviewChanges {
        rating: check_rating(&mut errors, input.rating.as_ref(), presence),
        comment: errors.text("comment", input.comment.as_ref(), presence, None),
    };
    errors.finish()?;
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_input() -> ListingInput {
        ListingInput {
            start_location: Some(json!("  New York ")),
            destination: Some(json!("Paris")),
            total_price: Some(json!("1500")),
        }
    }

    fn found() -> ListingLookup {
        ListingLookup::Found(ListingId("listing-1".to_string()))
    }

    fn booking_input() -> BookingInput {
        BookingInput {
            listing: Some(json!("listing-1")),
            start_date: Some(json!("2024-01-15")),
            end_date: Some(json!("2024-01-22")),
            status: None,
        }
    }

    fn review_input(rating: Value) -> ReviewInput {
        ReviewInput {
            listing: Some(json!("listing-1")),
            rating: Some(rating),
            comment: Some(json!("ok")),
        }
    }

    #[test]
    fn new_listing_trims_text_and_fixes_price_scale() {
        let listing = validate_new_listing(&listing_input()).expect("valid listing");
        assert_eq!(listing.start_location, "New York");
        assert_eq!(listing.total_price.to_string(), "1500.00");
    }

    #[test]
    fn new_listing_reports_every_missing_field() {
        let errors = validate_new_listing(&ListingInput::default()).expect_err("empty payload");
        assert_eq!(errors.errors().len(), 3);
        for field in ["start_location", "destination", "total_price"] {
            assert_eq!(errors.reasons_for(field), vec![REQUIRED]);
        }
    }

    #[test]
    fn price_rules_cover_sign_places_and_digits() {
        let mut input = listing_input();
        input.total_price = Some(json!(-1));
        assert!(validate_new_listing(&input)
            .expect_err("negative")
            .contains("total_price"));

        input.total_price = Some(json!("10.005"));
        assert!(validate_new_listing(&input)
            .expect_err("three places")
            .reasons_for("total_price")[0]
            .contains("decimal places"));

        input.total_price = Some(json!(123456789));
        assert!(validate_new_listing(&input)
            .expect_err("too many digits")
            .reasons_for("total_price")[0]
            .contains("8 digits"));

        input.total_price = Some(json!(0));
        assert!(validate_new_listing(&input).is_ok());
    }

    #[test]
    fn price_accepts_numbers_and_numeric_strings_only() {
        let mut input = listing_input();
        input.total_price = Some(json!(99.5));
        let listing = validate_new_listing(&input).expect("float price");
        assert_eq!(listing.total_price.to_string(), "99.50");

        for bad in [json!("abc"), json!(true), json!([1]), json!({"amount": 1})] {
            input.total_price = Some(bad.clone());
            let errors = validate_new_listing(&input).expect_err("not a number");
            assert_eq!(errors.reasons_for("total_price"), vec![NOT_A_NUMBER], "{bad}");
            assert_eq!(errors.errors().len(), 1);
        }
    }

    #[test]
    fn blank_and_oversized_text_fail() {
        let mut input = listing_input();
        input.start_location = Some(json!("   "));
        input.destination = Some(json!("x".repeat(256)));
        let errors = validate_new_listing(&input).expect_err("invalid text");
        assert_eq!(errors.reasons_for("start_location"), vec![BLANK]);
        assert!(errors.reasons_for("destination")[0].contains("255"));
    }

    #[test]
    fn text_rejects_non_scalar_values() {
        let mut input = listing_input();
        input.destination = Some(json!(["Paris"]));
        let errors = validate_new_listing(&input).expect_err("list destination");
        assert_eq!(errors.reasons_for("destination"), vec![NOT_A_STRING]);
    }

    #[test]
    fn partial_listing_changes_skip_absent_fields() {
        let input = ListingInput {
            destination: Some(json!("Rome")),
            ..ListingInput::default()
        };
        let changes = validate_listing_changes(&input).expect("valid patch");
        assert_eq!(changes.destination.as_deref(), Some("Rome"));
        assert!(changes.start_location.is_none());
        assert!(changes.total_price.is_none());
    }

    #[test]
    fn explicit_null_fails_even_when_optional() {
        let input = ListingInput {
            total_price: Some(Value::Null),
            ..ListingInput::default()
        };
        let errors = validate_listing_changes(&input).expect_err("null price");
        assert_eq!(errors.reasons_for("total_price"), vec![NULL]);

        let input = ReviewInput {
            comment: Some(Value::Null),
            ..ReviewInput::default()
        };
        let errors =
            validate_review_changes(&input, Presence::Optional).expect_err("null comment");
        assert_eq!(errors.reasons_for("comment"), vec![NULL]);
    }

    #[test]
    fn booking_requires_known_listing_and_dates() {
        let input = BookingInput {
            end_date: None,
            ..booking_input()
        };
        let errors =
            validate_new_booking(&input, &ListingLookup::Missing).expect_err("invalid booking");
        assert_eq!(errors.reasons_for("listing"), vec![NO_SUCH_LISTING]);
        assert_eq!(errors.reasons_for("end_date"), vec![REQUIRED]);
        assert!(!errors.contains("start_date"));

        let errors =
            validate_new_booking(&booking_input(), &ListingLookup::Unmatched).expect_err("bad url");
        assert_eq!(errors.reasons_for("listing"), vec![NO_URL_MATCH]);
    }

    #[test]
    fn listing_reference_must_be_a_string() {
        let input = BookingInput {
            listing: Some(json!(42)),
            ..booking_input()
        };
        let errors = validate_new_booking(&input, &found()).expect_err("numeric listing");
        assert_eq!(
            errors.reasons_for("listing"),
            vec!["Incorrect type. Expected URL string, received int."]
        );
    }

    #[test]
    fn booking_defaults_to_pending_and_rejects_unknown_status() {
        let mut input = booking_input();
        let booking = validate_new_booking(&input, &found()).expect("valid booking");
        assert_eq!(booking.status, BookingStatus::Pending);

        input.status = Some(json!("shipped"));
        let errors = validate_new_booking(&input, &found()).expect_err("bad status");
        assert_eq!(
            errors.reasons_for("status"),
            vec!["\"shipped\" is not a valid choice."]
        );

        input.status = Some(Value::Null);
        let errors = validate_new_booking(&input, &found()).expect_err("null status");
        assert_eq!(errors.reasons_for("status"), vec![NULL]);
    }

    #[test]
    fn booking_dates_must_parse_and_be_ordered() {
        let input = BookingInput {
            start_date: Some(json!("15/01/2024")),
            end_date: Some(json!(20240122)),
            ..booking_input()
        };
        let errors = validate_new_booking(&input, &found()).expect_err("bad date");
        assert!(errors.reasons_for("start_date")[0].contains("YYYY-MM-DD"));
        assert!(errors.reasons_for("end_date")[0].contains("YYYY-MM-DD"));

        let reversed = BookingInput {
            start_date: Some(json!("2024-01-22")),
            end_date: Some(json!("2024-01-15")),
            ..input
        };
        let errors = validate_new_booking(&reversed, &found()).expect_err("reversed dates");
        assert!(errors.contains("end_date"));
    }

    #[test]
    fn rating_outside_range_fails() {
        for rating in [-3, 0, 6, 100] {
            let errors = validate_new_review(&review_input(json!(rating)), &found())
                .expect_err("rating out of range");
            assert_eq!(errors.errors().len(), 1, "rating {rating}");
            assert!(errors.contains("rating"));
        }

        for rating in 1..=5 {
            assert!(validate_new_review(&review_input(json!(rating)), &found()).is_ok());
        }
    }

    #[test]
    fn rating_coerces_integral_strings_and_floats() {
        for rating in [json!("5"), json!(" 4 "), json!("3.0"), json!(2.0)] {
            let review = validate_new_review(&review_input(rating.clone()), &found())
                .unwrap_or_else(|errors| panic!("{rating} rejected: {errors}"));
            assert!((1..=5).contains(&review.rating));
        }

        for rating in [json!("five"), json!("4.5"), json!(4.5), json!(true), json!([5])] {
            let errors = validate_new_review(&review_input(rating.clone()), &found())
                .expect_err("not an integer");
            assert_eq!(errors.reasons_for("rating"), vec![NOT_AN_INTEGER], "{rating}");
        }
    }

    #[test]
    fn review_changes_respect_presence() {
        let input = ReviewInput {
            rating: Some(json!(4)),
            ..ReviewInput::default()
        };
        assert!(validate_review_changes(&input, Presence::Optional).is_ok());
        let errors =
            validate_review_changes(&input, Presence::Required).expect_err("comment missing");
        assert_eq!(errors.reasons_for("comment"), vec![REQUIRED]);
    }

    #[test]
    fn errors_group_by_field_for_the_wire() {
        let errors = validate_new_review(&ReviewInput::default(), &ListingLookup::Unmatched)
            .expect_err("empty");
        let grouped = errors.by_field();
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped["rating"], vec![REQUIRED.to_string()]);
        assert_eq!(errors.to_string(), "invalid fields: listing, rating, comment");
    }
}
