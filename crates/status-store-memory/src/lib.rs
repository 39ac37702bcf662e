//! In-memory (single node) implementation of the status store for local development and tests.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use fleet_status_store::{CompositeStatus, CompositeTarget, StatusStore};
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory status store. Clones share the same targets and counters.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatusStore {
    targets: Arc<Mutex<HashMap<String, CompositeTarget>>>,
    patch_count: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStatusStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a single target with no status.
    #[must_use]
    pub fn with_target(name: impl Into<String>) -> Self {
        let target = CompositeTarget::new(name);

        Self {
            targets: Arc::new(Mutex::new(HashMap::from([(target.name.clone(), target)]))),
            ..Self::default()
        }
    }

    /// Inserts or replaces a target as-is.
    pub async fn insert(&self, target: CompositeTarget) {
        self.targets
            .lock()
            .await
            .insert(target.name.clone(), target);
    }

    /// Number of successful status patches since creation.
    #[must_use]
    pub fn patch_count(&self) -> usize {
        self.patch_count.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with [`Error::Unavailable`] until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Unavailable);
        }

        Ok(())
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    type Error = Error;

    async fn get(&self, name: &str) -> Result<Option<CompositeTarget>, Self::Error> {
        self.check_available()?;

        Ok(self.targets.lock().await.get(name).cloned())
    }

    async fn patch_status(
        &self,
        target: &CompositeTarget,
        status: CompositeStatus,
    ) -> Result<CompositeTarget, Self::Error> {
        self.check_available()?;

        let mut targets = self.targets.lock().await;

        let stored = targets
            .get_mut(&target.name)
            .ok_or_else(|| Error::TargetNotFound(target.name.clone()))?;

        if stored.resource_version != target.resource_version {
            return Err(Error::Conflict {
                name: target.name.clone(),
                expected: target.resource_version,
                actual: stored.resource_version,
            });
        }

        stored.status = Some(status);
        stored.resource_version += 1;
        self.patch_count.fetch_add(1, Ordering::SeqCst);

        debug!(
            "Patched status of {} to version {}",
            stored.name, stored.resource_version
        );

        Ok(stored.clone())
    }
}
