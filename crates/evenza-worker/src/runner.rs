//! Sweep runner — the long-lived task that drives the scheduled sweep.
//!
//! One timer per process. Each tick runs to completion before the next
//! interval starts, so a slow tick delays the next one instead of
//! overlapping it. Started once at boot and stopped through the shutdown
//! watch channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing;

use evenza_core::config::worker::WorkerConfig;
use evenza_service::announcement::AnnouncementService;

/// Drives the recurring scheduled-announcement sweep.
#[derive(Debug)]
pub struct SweepRunner {
    /// The announcement service whose sweep is invoked each tick.
    service: Arc<AnnouncementService>,
    /// Worker configuration.
    config: WorkerConfig,
}

impl SweepRunner {
    /// Create a new sweep runner.
    pub fn new(service: Arc<AnnouncementService>, config: WorkerConfig) -> Self {
        Self { service, config }
    }

    /// Run the sweep loop until the shutdown signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        let interval = Duration::from_secs(self.config.sweep_interval_seconds);
        tracing::info!(
            interval_seconds = self.config.sweep_interval_seconds,
            "Announcement sweep started"
        );

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Announcement sweep received shutdown signal");
                        break;
                    }
                }
                _ = self.tick() => {
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                tracing::info!("Announcement sweep shutting down");
                                break;
                            }
                        }
                        _ = time::sleep(interval) => {}
                    }
                }
            }
        }

        tracing::info!("Announcement sweep shut down complete");
    }

    /// One sweep tick. Failures are logged, never propagated — the next
    /// tick retries by re-selecting whatever is still due.
    async fn tick(&self) {
        match self.service.sweep_due(Utc::now()).await {
            Ok(outcome) => {
                if outcome.due > 0 {
                    tracing::info!(
                        due = outcome.due,
                        promoted = outcome.promoted,
                        delivered = outcome.delivered,
                        failed = outcome.failed,
                        "Sweep tick completed"
                    );
                } else {
                    tracing::trace!("Sweep tick found nothing due");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Sweep tick failed");
            }
        }
    }
}
