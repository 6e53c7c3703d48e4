//! Background refresh cache
//!
//! The IpRangeCache is responsible for:
//! - Seeding the snapshot store with a best-effort initial fetch
//! - Running the fixed-interval refresh worker on a dedicated task
//! - Serving non-blocking snapshot reads to arbitrary concurrent callers
//! - Cancelling the worker on shutdown
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      fetch_ranges()      ┌──────────────┐
//! │ RangeSource  │◄─────────────────────────│ RefreshWorker│── RefreshEvent ──►
//! └──────────────┘                          └──────────────┘
//!                                                  │ replace()
//!                                                  ▼
//!                                          ┌───────────────┐
//!                  read() ◄────────────────│ SnapshotStore │
//!            (any number of tasks)         └───────────────┘
//! ```
//!
//! ## Refresh Cycle
//!
//! 1. Wait for the next interval tick (or cancellation)
//! 2. Fetch raw range expressions, bounded by the configured timeout
//! 3. Parse all expressions into prefixes, all-or-nothing
//! 4. On success, install the new snapshot wholesale
//! 5. On failure, keep the previous snapshot and wait for the next tick
//!
//! There is no retry-with-backoff: the fixed interval is the retry mechanism.

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, warn};

use crate::config::RefreshConfig;
use crate::error::{Error, Result};
use crate::prefix::parse_range_expressions;
use crate::store::{Snapshot, SnapshotStore};
use crate::traits::RangeSource;

/// Events emitted by the refresh worker
///
/// The receiver is optional to drain; when the channel is full, new events
/// are dropped with a warning. Fetch failures are otherwise invisible to
/// readers, so this channel is how operators learn about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    /// Worker started
    Started,

    /// A fetch cycle succeeded and a new snapshot was installed
    RefreshSucceeded {
        /// Number of prefixes in the installed snapshot
        prefixes: usize,
    },

    /// A fetch cycle failed; the previous snapshot was retained
    RefreshFailed {
        /// Rendered error message
        error: String,
    },

    /// Worker stopped (cancellation observed)
    Stopped,
}

/// Background-refreshed cache of IP range prefixes
///
/// ## Lifecycle
///
/// 1. Create with [`IpRangeCache::provision()`] (must run inside a tokio
///    runtime; it spawns the refresh worker)
/// 2. Call [`IpRangeCache::get_ip_ranges()`] from any number of concurrent
///    tasks; reads never block on the network
/// 3. Stop with [`IpRangeCache::shutdown()`]; dropping the cache cancels the
///    worker as well
///
/// The last installed snapshot stays readable after shutdown for anyone
/// still holding the cache or a snapshot reference.
pub struct IpRangeCache {
    /// Shared snapshot store (the worker holds the writing clone)
    store: SnapshotStore,

    /// Cancellation signal owned by this controller
    shutdown_tx: watch::Sender<bool>,

    /// Worker handle, taken once by `shutdown_and_wait`
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl IpRangeCache {
    /// Validate the configuration and start the refresh worker
    ///
    /// The worker performs one best-effort fetch immediately, so serving can
    /// begin with real data as soon as possible. If that first fetch fails,
    /// the cache starts empty and proceeds degraded rather than failing
    /// provisioning.
    ///
    /// # Returns
    ///
    /// A tuple of (cache, event_receiver) where event_receiver yields
    /// [`RefreshEvent`]s for monitoring.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the configuration is invalid. Configuration is the
    /// only error class that halts provisioning.
    pub fn provision(
        source: Box<dyn RangeSource>,
        config: RefreshConfig,
    ) -> Result<(Self, mpsc::Receiver<RefreshEvent>)> {
        config.validate()?;

        let store = SnapshotStore::new();
        let (event_tx, event_rx) = mpsc::channel(config.event_channel_capacity);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = RefreshWorker {
            source,
            config,
            store: store.clone(),
            events: event_tx,
        };
        let handle = tokio::spawn(worker.run(shutdown_rx));

        Ok((
            Self {
                store,
                shutdown_tx,
                worker: Mutex::new(Some(handle)),
            },
            event_rx,
        ))
    }

    /// Return the most recently installed snapshot
    ///
    /// Synchronous and safe for high-frequency concurrent calls: the cost is
    /// one read-lock acquisition and one Arc clone. Returns the empty
    /// snapshot if no fetch has succeeded yet.
    pub fn get_ip_ranges(&self) -> Snapshot {
        self.store.read()
    }

    /// A cloneable read handle to the underlying store
    ///
    /// Useful when readers should not hold the whole cache (and its
    /// shutdown authority), only the data.
    pub fn store(&self) -> SnapshotStore {
        self.store.clone()
    }

    /// Signal the refresh worker to stop
    ///
    /// The worker observes the signal at its next wait point; an in-flight
    /// fetch is abandoned. No further snapshots are installed afterwards.
    /// Idempotent.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Signal shutdown and wait for the worker task to exit
    pub async fn shutdown_and_wait(&self) {
        self.shutdown();
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

/// The background task driving periodic refreshes
///
/// Sole writer to the snapshot store. All blocking waits (interval tick,
/// outward fetch) happen on this task, never on a reader's path.
struct RefreshWorker {
    source: Box<dyn RangeSource>,
    config: RefreshConfig,
    store: SnapshotStore,
    events: mpsc::Sender<RefreshEvent>,
}

impl RefreshWorker {
    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = self.source.source_name(),
            interval = ?self.config.effective_interval(),
            "starting range refresh worker"
        );
        self.emit(RefreshEvent::Started);

        // Seed the store before the ticking loop engages. Best-effort: a
        // failure here leaves the store empty until the next tick.
        tokio::select! {
            biased;
            _ = shutdown.changed() => {
                self.emit(RefreshEvent::Stopped);
                return;
            }
            result = self.refresh_once() => self.report(result),
        }

        let period = self.config.effective_interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                result = self.refresh_once() => self.report(result),
            }
        }

        info!("range refresh worker stopped");
        self.emit(RefreshEvent::Stopped);
    }

    /// One full fetch-and-install cycle
    ///
    /// Returns the installed snapshot size; on any error the store is left
    /// untouched.
    async fn refresh_once(&self) -> Result<usize> {
        let raw = self.fetch_raw().await?;
        let prefixes = parse_range_expressions(&raw)?;
        let count = prefixes.len();
        self.store.replace(prefixes);
        Ok(count)
    }

    /// Fetch raw expressions, bounded by the configured per-fetch deadline
    async fn fetch_raw(&self) -> Result<Vec<String>> {
        match self.config.fetch_timeout() {
            Some(deadline) => tokio::time::timeout(deadline, self.source.fetch_ranges())
                .await
                .map_err(|_| Error::Timeout(deadline))?,
            None => self.source.fetch_ranges().await,
        }
    }

    fn report(&self, result: Result<usize>) {
        match result {
            Ok(count) => {
                debug!(prefixes = count, "installed new range snapshot");
                self.emit(RefreshEvent::RefreshSucceeded { prefixes: count });
            }
            Err(err) => {
                // A failed refresh keeps the previous snapshot; the fixed
                // interval is the retry mechanism.
                if err.is_transient() {
                    warn!(error = %err, "range refresh failed, keeping previous snapshot");
                } else {
                    error!(error = %err, "range refresh failed unexpectedly");
                }
                self.emit(RefreshEvent::RefreshFailed {
                    error: err.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: RefreshEvent) {
        if self.events.try_send(event).is_err() {
            warn!("refresh event channel full or closed, dropping event");
        }
    }
}
