//! Booking confirmation e-mails, decoupled from the request path.
//!
//! Handlers hand a [`Job`] carrying only the booking id to a [`JobQueue`] and
//! return immediately. A pool of [`NotificationWorker`]s drains the queue,
//! reloads the booking, and delivers the message through a [`Mailer`].

use std::sync::Arc;

use async_channel::{Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::domain::{Booking, BookingId, Listing};
use super::store::{EntityStore, StoreError};

/// Every background job the service knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    BookingConfirmationEmail,
}

impl JobKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BookingConfirmationEmail => "booking_confirmation_email",
        }
    }
}

/// Lifecycle event that caused a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingTrigger {
    Created,
    Confirmed,
}

/// Self-contained queue message. The booking is reloaded by the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub kind: JobKind,
    pub booking_id: BookingId,
    pub trigger: BookingTrigger,
}

/// Fire-and-forget queue client injected into the service.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, job: Job) -> Result<(), QueueError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("job queue closed")]
    Closed,
    #[error("job queue unavailable: {0}")]
    Unavailable(String),
}

/// Enqueues confirmation jobs on booking lifecycle events.
pub struct NotificationDispatcher<Q> {
    queue: Arc<Q>,
}

impl<Q> Clone for NotificationDispatcher<Q> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<Q: JobQueue> NotificationDispatcher<Q> {
    pub fn new(queue: Arc<Q>) -> Self {
        Self { queue }
    }

    pub fn on_booking_event(
        &self,
        booking_id: &BookingId,
        trigger: BookingTrigger,
    ) -> Result<(), QueueError> {
        let job = Job {
            kind: JobKind::BookingConfirmationEmail,
            booking_id: booking_id.clone(),
            trigger,
        };
        self.queue.enqueue(job)?;
        info!(booking_id = %booking_id, ?trigger, "booking confirmation email enqueued");
        Ok(())
    }
}

/// In-process queue backed by an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelJobQueue {
    sender: Sender<Job>,
}

impl ChannelJobQueue {
    pub fn unbounded() -> (Self, Receiver<Job>) {
        let (sender, receiver) = async_channel::unbounded();
        (Self { sender }, receiver)
    }

    /// Stop accepting jobs. Workers drain what is already queued, then exit.
    pub fn close(&self) -> bool {
        self.sender.close()
    }

    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl JobQueue for ChannelJobQueue {
    fn enqueue(&self, job: Job) -> Result<(), QueueError> {
        self.sender.try_send(job).map_err(|err| match err {
            TrySendError::Closed(_) => QueueError::Closed,
            TrySendError::Full(_) => QueueError::Unavailable("queue at capacity".to_string()),
        })
    }
}

/// Outbound e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Mail transport boundary (SMTP relay, provider API, ...).
pub trait Mailer: Send + Sync {
    fn send(&self, message: &MailMessage) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("mail transport rejected message: {0}")]
    Rejected(String),
    #[error("message has no recipients")]
    NoRecipients,
}

/// Transport that records deliveries in the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &MailMessage) -> Result<(), DeliveryError> {
        if message.to.is_empty() {
            return Err(DeliveryError::NoRecipients);
        }
        info!(
            subject = %message.subject,
            from = %message.from,
            to = ?message.to,
            "booking email delivered"
        );
        Ok(())
    }
}

/// Envelope applied to every booking e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub fn confirmation_subject(booking: &Booking) -> String {
    format!("Booking Confirmation - {}", booking.booking_id)
}

pub fn confirmation_body(booking: &Booking, listing: &Listing) -> String {
    format!(
        "Dear Customer,\n\n\
         Your booking has been successfully placed!\n\
         Booking ID: {}\n\
         Listing: {}\n\
         Start Date: {}\n\
         End Date: {}\n\n\
         Thank you for choosing us!\n",
        booking.booking_id,
        listing.route(),
        booking.start_date,
        booking.end_date,
    )
}

/// Executes queued jobs against the store.
pub struct NotificationWorker<S, M> {
    store: Arc<S>,
    mailer: Arc<M>,
    settings: MailSettings,
}

impl<S, M> NotificationWorker<S, M>
where
    S: EntityStore + 'static,
    M: Mailer + 'static,
{
    pub fn new(store: Arc<S>, mailer: Arc<M>, settings: MailSettings) -> Self {
        Self {
            store,
            mailer,
            settings,
        }
    }

    /// Run a single job, returning the message that was handed to the mailer.
    pub fn handle(&self, job: &Job) -> Result<MailMessage, WorkerError> {
        match job.kind {
            JobKind::BookingConfirmationEmail => self.send_booking_confirmation(&job.booking_id),
        }
    }

    fn send_booking_confirmation(&self, booking_id: &BookingId) -> Result<MailMessage, WorkerError> {
        let booking = self
            .store
            .fetch_booking(booking_id)?
            .ok_or_else(|| WorkerError::BookingNotFound(booking_id.clone()))?;
        // the listing cascade removes its bookings, so a missing listing means the booking is gone too
        let listing = self
            .store
            .fetch_listing(&booking.listing_id)?
            .ok_or_else(|| WorkerError::BookingNotFound(booking_id.clone()))?;

        let message = MailMessage {
            subject: confirmation_subject(&booking),
            body: confirmation_body(&booking, &listing),
            from: self.settings.from.clone(),
            to: self.settings.recipients.clone(),
        };
        self.mailer.send(&message)?;
        Ok(message)
    }

    /// Drain jobs until the channel is closed and empty.
    pub async fn run(self: Arc<Self>, jobs: Receiver<Job>) {
        while let Ok(job) = jobs.recv().await {
            match self.handle(&job) {
                Ok(message) => {
                    info!(job = job.kind.name(), booking_id = %job.booking_id, subject = %message.subject, "job completed");
                }
                Err(WorkerError::BookingNotFound(id)) => {
                    warn!(job = job.kind.name(), booking_id = %id, "booking vanished before notification; dropping job");
                }
                Err(err) => {
                    error!(job = job.kind.name(), booking_id = %job.booking_id, error = %err, "job failed");
                }
            }
        }
    }
}

/// Start `count` workers sharing one receiver. Jobs run in parallel with no
/// ordering guarantee.
pub fn spawn_workers<S, M>(
    worker: Arc<NotificationWorker<S, M>>,
    jobs: Receiver<Job>,
    count: usize,
) -> Vec<JoinHandle<()>>
where
    S: EntityStore + 'static,
    M: Mailer + 'static,
{
    (0..count.max(1))
        .map(|_| tokio::spawn(worker.clone().run(jobs.clone())))
        .collect()
}
