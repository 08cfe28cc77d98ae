//! Background status refresh
//!
//! Reads already recompute status, but the persisted collection only moves
//! from pending to overdue when something writes it. The refresher runs a
//! full recompute pass on a fixed interval so the stored book follows the
//! calendar even when nobody touches it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::store::SharedInvoiceStore;

/// Default pass interval: hourly
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Periodic full recompute of stored invoice statuses
pub struct StatusRefresher {
    store: SharedInvoiceStore,
    period: Duration,
    shutdown: Arc<Notify>,
}

impl StatusRefresher {
    /// Creates a refresher running one pass every `period`
    pub fn new(store: SharedInvoiceStore, period: Duration) -> Self {
        Self {
            store,
            period,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Spawns the refresh loop
    ///
    /// The first pass runs one full period after start. Each pass runs on
    /// the blocking pool while it holds the store. Ticks missed during a
    /// pass are skipped, not replayed. Must be called from within a tokio
    /// runtime.
    pub fn start(self) -> RefreshHandle {
        let shutdown = self.shutdown.clone();
        let store = self.store;
        let period = self.period;

        let task = tokio::spawn(async move {
            tracing::info!(period_secs = period.as_secs(), "Status refresher started");

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.notified() => {
                        tracing::info!("Status refresher received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        // The pass ends in a synchronous storage write
                        let guard = store.clone().lock_owned().await;
                        let pass = tokio::task::spawn_blocking(move || {
                            let mut guard = guard;
                            guard.refresh_statuses()
                        });
                        match pass.await {
                            Ok(Ok(changed)) => {
                                tracing::debug!(changed, "Status refresh pass complete");
                            }
                            Ok(Err(err)) => {
                                tracing::warn!(error = %err, "Status refresh pass failed");
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "Status refresh pass panicked");
                            }
                        }
                    }
                }
            }

            tracing::info!("Status refresher stopped");
        });

        RefreshHandle {
            shutdown: self.shutdown,
            task,
        }
    }
}

/// Handle to a running [`StatusRefresher`]
///
/// Dropping the handle leaves the task running; call [`RefreshHandle::stop`]
/// on teardown.
pub struct RefreshHandle {
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Returns true while the refresh loop is running
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the loop to stop and waits for it to finish
    pub async fn stop(self) {
        self.shutdown.notify_one();
        if let Err(err) = self.task.await {
            tracing::warn!(error = %err, "Status refresher task ended abnormally");
        }
    }
}
