use futures::future::join_all;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use travel_listings::bookings::{
    spawn_workers, ChannelJobQueue, EntityStore, MailSettings, Mailer, NotificationWorker,
};
use travel_listings::config::NotificationConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn mail_settings(config: &NotificationConfig) -> MailSettings {
    MailSettings {
        from: config.mail_from.clone(),
        recipients: config.recipients.clone(),
    }
}

/// Job channel plus the worker tasks draining it.
pub(crate) struct NotificationRuntime {
    queue: Arc<ChannelJobQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl NotificationRuntime {
    pub(crate) fn start<S, M>(
        store: Arc<S>,
        mailer: Arc<M>,
        settings: MailSettings,
        workers: usize,
    ) -> Self
    where
        S: EntityStore + 'static,
        M: Mailer + 'static,
    {
        let (queue, jobs) = ChannelJobQueue::unbounded();
        let worker = Arc::new(NotificationWorker::new(store, mailer, settings));
        let workers = spawn_workers(worker, jobs, workers);
        info!(workers = workers.len(), "notification workers started");

        Self {
            queue: Arc::new(queue),
            workers,
        }
    }

    pub(crate) fn queue(&self) -> Arc<ChannelJobQueue> {
        self.queue.clone()
    }

    /// Close the channel and wait for queued jobs to finish.
    pub(crate) async fn shutdown(self) {
        self.queue.close();
        for result in join_all(self.workers).await {
            if let Err(err) = result {
                warn!(error = %err, "notification worker terminated abnormally");
            }
        }
        info!("notification workers stopped");
    }
}
