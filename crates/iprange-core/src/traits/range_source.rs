// # Range Source Trait
//
// Defines the interface for fetching raw IP range expressions from a remote
// data source.
//
// ## Implementations
//
// - HTTP edge-list endpoints: `iprange-source-http` crate
// - Test doubles: scripted sources in the contract tests
//
// ## Responsibility Boundary
//
// A range source performs exactly one outward call per invocation (or a small
// fixed set, e.g. one per address family) and returns the raw expressions in
// the order the source reported them. It must not:
// - parse expressions into prefixes (the cache does that, all-or-nothing)
// - cache or mutate shared state (the refresh worker installs results)
// - retry on its own (the fixed refresh interval is the retry mechanism)
//
// Implementations must return promptly when their future is dropped; the
// refresh worker races every fetch against the cancellation signal.

use async_trait::async_trait;

use crate::error::Result;

/// Trait for range source implementations
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Fetch the current list of raw range expressions
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: the complete, ordered list of raw expressions
    /// - `Err(Error)`: transport failure; no partial list is ever returned
    async fn fetch_ranges(&self) -> Result<Vec<String>>;

    /// Short name of this source, for logs and events
    fn source_name(&self) -> &'static str {
        "unknown"
    }
}
