/// Published snapshot cache.
///
/// The cache is the single point of visibility change between the ingestion
/// cycle and the query path. A cycle builds its snapshot entirely off to the
/// side and publishes it with one swap; readers clone a shared handle under
/// a read lock that is held only for the pointer copy, never across I/O.
/// No other component holds a mutable reference to the live snapshot.

use std::sync::{Arc, RwLock};

use crate::model::Snapshot;

#[derive(Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotCache {
    /// Starts with the empty snapshot; queries served before the first
    /// successful cycle see zero zones and no timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last published snapshot. Never blocks behind ingestion
    /// work: writers only hold the lock for a pointer swap.
    pub fn current(&self) -> Arc<Snapshot> {
        // The lock only guards a pointer copy, which cannot panic, so a
        // poisoned lock still holds a consistent value.
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Atomically replaces the published snapshot. A reader observes either
    /// the previous snapshot or this one in full, never a mixture.
    pub fn replace(&self, snapshot: Snapshot) {
        let published = Arc::new(snapshot);
        match self.inner.write() {
            Ok(mut guard) => *guard = published,
            Err(poisoned) => *poisoned.into_inner() = published,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
