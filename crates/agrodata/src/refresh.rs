//! Background full refreshes: on admin request and, optionally, on a timer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use agrodata_service::AgDataService;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

/// Spawns refreshes and tracks them so shutdown can wait for the ones in
/// flight.
#[derive(Clone)]
pub struct Refresher {
    service: Arc<AgDataService>,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl Refresher {
    pub fn new(service: Arc<AgDataService>) -> Self {
        Self {
            service,
            tracker: TaskTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Start one full refresh in the background. Returns its id.
    pub fn trigger(&self) -> Uuid {
        let id = Uuid::new_v4();
        let service = Arc::clone(&self.service);
        self.tracker.spawn(async move {
            run_refresh(&service, id).await;
        });
        id
    }

    /// Refresh every `interval` until shutdown. The first run is one interval
    /// after start.
    pub fn start_auto_refresh(&self, interval: Duration) {
        let service = Arc::clone(&self.service);
        let cancel = self.cancel.clone();
        tracing::info!(interval_secs = interval.as_secs(), "Auto-refresh enabled");
        self.tracker.spawn(async move {
            auto_refresh_loop(service, interval, cancel).await;
        });
    }

    /// Number of refresh tasks (including the auto-refresh loop) still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Stop the timer loop and wait for running refreshes to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        tracing::info!("Refresh tasks stopped");
    }
}

async fn auto_refresh_loop(service: Arc<AgDataService>, interval: Duration, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Auto-refresh loop shutting down");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                run_refresh(&service, Uuid::new_v4()).await;
            }
        }
    }
}

async fn run_refresh(service: &AgDataService, id: Uuid) {
    let start = Instant::now();
    tracing::info!(refresh_id = %id, "Starting full data refresh");
    let entries = service.refresh_all().await;
    tracing::info!(
        refresh_id = %id,
        entries,
        elapsed_ms = start.elapsed().as_millis(),
        "Data refresh complete"
    );
}
