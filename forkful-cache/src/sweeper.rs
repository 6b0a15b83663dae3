//! Background sweep of expired cache entries.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::cache::TtlCache;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running sweep task.
///
/// [`shutdown`](Self::shutdown) stops the task and waits for it. Dropping
/// the handle without calling it aborts the task.
pub struct SweeperHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    pub(crate) fn spawn(cache: TtlCache, period: Duration) -> Self {
        let period = period.max(MIN_SWEEP_INTERVAL);
        let (stop, mut stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let removed = cache.cleanup();
                        if removed > 0 {
                            debug!(removed, remaining = cache.len(), "Swept expired cache entries");
                        }
                    }
                }
            }

            debug!("Cache sweeper stopped");
        });

        debug!(interval_ms = period.as_millis() as u64, "Cache sweeper started");

        Self {
            stop: Some(stop),
            task: Some(task),
        }
    }

    /// Returns true while the sweep task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the sweep task and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Cache sweeper exited abnormally");
                }
            }
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
