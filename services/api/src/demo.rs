use crate::infra::NotificationRuntime;
use clap::Args;
use serde_json::json;
use std::io::{self, Write};
use std::sync::Arc;
use travel_listings::bookings::{
    seed_sample_data, BookingInput, DeliveryError, EntityStore, LinkBuilder, MailMessage,
    MailSettings, Mailer, MemoryStore, StoreError, TravelService, UpdateMode,
};
use travel_listings::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Base URL used for hyperlinks in the printed views
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub(crate) base_url: String,
    /// Recipient for the confirmation e-mail
    #[arg(long, default_value = "bookings@alx-travel.local")]
    pub(crate) mail_to: String,
    /// Only seed and print the listing rows
    #[arg(long)]
    pub(crate) skip_booking: bool,
}

/// Prints delivered mail instead of handing it to a transport.
struct ConsoleMailer;

impl Mailer for ConsoleMailer {
    fn send(&self, message: &MailMessage) -> Result<(), DeliveryError> {
        if message.to.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }
        println!("--- mail to {} ---", message.to.join(", "));
        println!("Subject: {}", message.subject);
        println!("{}", message.body);
        Ok(())
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::new());
    let summary = seed_sample_data(store.as_ref())?;
    println!(
        "Seeded {} listings, {} bookings, {} reviews",
        summary.listings.len(),
        summary.bookings.len(),
        summary.reviews.len()
    );

    let stdout = io::stdout();
    write_listing_rows(store.as_ref(), &mut stdout.lock())?;

    if args.skip_booking {
        return Ok(());
    }

    let notifications = NotificationRuntime::start(
        store.clone(),
        Arc::new(ConsoleMailer),
        MailSettings {
            from: "no-reply@alx-travel.local".to_string(),
            recipients: vec![args.mail_to],
        },
        1,
    );
    let service = TravelService::new(
        store,
        notifications.queue(),
        LinkBuilder::new(args.base_url),
    );

    let listing = summary
        .listings
        .last()
        .ok_or(StoreError::NotFound)?;
    let booking = service.create_booking(&BookingInput {
        listing: Some(json!(listing.as_str())),
        start_date: Some(json!("2024-03-01")),
        end_date: Some(json!("2024-03-08")),
        status: None,
    })?;
    println!("Created booking {} ({})", booking.booking_id, booking.status);

    let confirmed = service.update_booking(
        &booking.booking_id,
        &BookingInput {
            status: Some(json!("confirmed")),
            ..BookingInput::default()
        },
        UpdateMode::Partial,
    )?;
    println!(
        "Booking {} is now {}; confirmation e-mail queued",
        confirmed.booking_id, confirmed.status
    );

    notifications.shutdown().await;
    Ok(())
}

/// Stream one line per listing: id, route, and price.
pub(crate) fn write_listing_rows<S, W>(store: &S, out: &mut W) -> Result<usize, AppError>
where
    S: EntityStore,
    W: Write,
{
    let listings = store.list_listings()?;
    writeln!(out, "{:<36}  {:<32}  {:>12}", "LISTING", "ROUTE", "PRICE")?;
    for listing in &listings {
        writeln!(
            out,
            "{:<36}  {:<32}  {:>12}",
            listing.listing_id.as_str(),
            listing.route(),
            listing.total_price.to_string()
        )?;
    }
    out.flush()?;
    Ok(listings.len())
}
