// # iprange-core
//
// Core library for the background IP-range refresh cache.
//
// ## Architecture Overview
//
// This library keeps an in-memory snapshot of CIDR prefixes fresh by polling
// a remote source on a fixed interval:
// - **RangeSource**: Trait for fetching raw range expressions from a remote API
// - **SnapshotStore**: Atomically replaceable, read-heavy prefix snapshot
// - **IpRangeCache**: Lifecycle owner that runs the background refresh worker
//
// ## Design Principles
//
// 1. **Single writer**: only the refresh worker installs snapshots
// 2. **Non-blocking reads**: readers never touch the network, ever
// 3. **All-or-nothing fetch**: a fetch with any malformed entry is discarded
// 4. **Graceful degradation**: a failed refresh keeps the previous snapshot
// 5. **Cooperative cancellation**: the worker and in-flight fetches observe a
//    single shutdown signal

pub mod cache;
pub mod config;
pub mod error;
pub mod prefix;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use cache::{IpRangeCache, RefreshEvent};
pub use config::RefreshConfig;
pub use error::{Error, Result};
pub use store::{Snapshot, SnapshotStore};
pub use traits::RangeSource;
