//! Travel listings backend: listings, bookings, and reviews over HTTP with
//! booking confirmation e-mails dispatched to a background worker pool.

pub mod bookings;
pub mod config;
pub mod error;
pub mod telemetry;
