//! TTL Cleanup Task
//!
//! Background reaper that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Smallest interval the reaper will tick at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Reaper Handle ==
/// Owner handle of a running reaper.
///
/// [`stop`](Self::stop) consumes the handle, so the shutdown signal can only
/// ever be sent once. Dropping the handle without stopping also ends the task
/// at its next wakeup.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for the task to exit.
    pub async fn stop(self) {
        // The receiver is gone only if the task already exited.
        let _ = self.shutdown.send(());

        if let Err(err) = self.handle.await {
            warn!(error = %err, "TTL cleanup task ended abnormally");
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a background task that removes expired entries every `cleanup_interval`.
///
/// The first run happens one full interval after spawning. Runs hold the
/// store's write lock only for the duration of the sweep.
///
/// # Example
/// ```ignore
/// let store = Arc::new(CacheStore::<String>::new());
/// let reaper = spawn_cleanup_task(store.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// reaper.stop().await;
/// ```
pub fn spawn_cleanup_task<V>(cache: Arc<CacheStore<V>>, cleanup_interval: Duration) -> ReaperHandle
where
    V: Send + Sync + 'static,
{
    let period = cleanup_interval.max(MIN_INTERVAL);
    let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(interval_ms = period.as_millis() as u64, "Starting TTL cleanup task");

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let removed = cache.cleanup_expired().await;
                    if removed > 0 {
                        info!(removed, "TTL cleanup: removed expired entries");
                    } else {
                        debug!("TTL cleanup: no expired entries found");
                    }
                }
            }
        }

        info!("TTL cleanup task stopped");
    });

    ReaperHandle { shutdown, handle }
}
