//! Configuration types for the refresh cache
//!
//! The embedding system hands these over as already-parsed values; how they
//! are read (file, flags, env) is the embedder's concern.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default refresh period applied when `interval` is left at zero
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

fn default_event_channel_capacity() -> usize {
    64
}

/// Refresh scheduling configuration
///
/// Both durations are fixed after provisioning; there is no dynamic
/// reconfiguration at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RefreshConfig {
    /// Time between refresh attempts. Zero means "use the default" (one hour).
    pub interval: Duration,

    /// Per-fetch deadline. Zero means unbounded; an in-flight fetch is then
    /// limited only by cancellation.
    pub timeout: Duration,

    /// Capacity of the refresh event channel
    ///
    /// When full, new events are dropped (with a warning log). This prevents
    /// unbounded memory growth when nobody drains the receiver.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl RefreshConfig {
    /// Create a configuration with defaults (hourly refresh, no deadline)
    pub fn new() -> Self {
        Self {
            interval: Duration::ZERO,
            timeout: Duration::ZERO,
            event_channel_capacity: default_event_channel_capacity(),
        }
    }

    /// Set the refresh interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the per-fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The refresh period actually used by the worker
    pub fn effective_interval(&self) -> Duration {
        if self.interval.is_zero() {
            DEFAULT_REFRESH_INTERVAL
        } else {
            self.interval
        }
    }

    /// The per-fetch deadline, if one is configured
    pub fn fetch_timeout(&self) -> Option<Duration> {
        if self.timeout.is_zero() {
            None
        } else {
            Some(self.timeout)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config(
                "event_channel_capacity must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new()
    }
}
