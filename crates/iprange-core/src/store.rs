// # Snapshot Store
//
// Holds the most recently installed prefix snapshot.
//
// ## Synchronization
//
// The store wraps an immutable `Arc<[IpNetwork]>` behind a `std::sync::RwLock`:
// many concurrent readers, at most one writer, and the critical section on
// either side is a single Arc clone or swap. A reader can never observe a mix
// of old and new data; it gets a reference to one complete snapshot, and
// holding on to it keeps that snapshot alive even after later replacements.
//
// ## Reader Path
//
// `read()` is synchronous and never touches the network. It is safe to call
// from every inbound request-handling path in the embedding system.

use ipnetwork::IpNetwork;
use std::sync::{Arc, RwLock};

/// An immutable, ordered set of prefixes from one successful fetch
pub type Snapshot = Arc<[IpNetwork]>;

/// Shared store for the current snapshot
///
/// Cloning the store is cheap and yields a handle to the same snapshot;
/// the refresh worker holds one clone as the sole writer.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Snapshot>>,
}

impl SnapshotStore {
    /// Create a store holding the empty snapshot
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::from(Vec::new()))),
        }
    }

    /// Install a new snapshot, fully replacing the old one
    ///
    /// Readers that already hold the previous snapshot keep seeing it;
    /// subsequent `read()` calls get the new one.
    pub fn replace(&self, prefixes: Vec<IpNetwork>) {
        let snapshot: Snapshot = Arc::from(prefixes);
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = snapshot;
    }

    /// Return the current snapshot (empty if none was ever installed)
    pub fn read(&self) -> Snapshot {
        let guard = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }

    /// Number of prefixes in the current snapshot
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the current snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
