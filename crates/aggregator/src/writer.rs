//! Idempotent persistence of the composite status.

use std::sync::Arc;

use fleet_status_store::{CompositeStatus, CompositeTarget, StatusStore};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Whether a status write actually reached the store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    /// The persisted status already matched; nothing was written.
    Unchanged,

    /// The status was patched.
    Written,
}

/// Writes the composite status only when it differs from the persisted one.
#[derive(Debug)]
pub struct StatusWriter<S>
where
    S: StatusStore,
{
    store: Arc<S>,
}

impl<S> Clone for StatusWriter<S>
where
    S: StatusStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> StatusWriter<S>
where
    S: StatusStore,
{
    /// Creates a writer backed by `store`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persists `desired` on `target` unless `target` already carries it.
    ///
    /// Issues at most one patch and never retries; a failed write is left for
    /// the next invocation to converge.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the patch.
    pub async fn update_status(
        &self,
        target: &CompositeTarget,
        desired: CompositeStatus,
    ) -> Result<WriteOutcome> {
        if target.status.as_ref() == Some(&desired) {
            debug!("Status of {} unchanged, skipping write", target.name);
            return Ok(WriteOutcome::Unchanged);
        }

        let updated = self
            .store
            .patch_status(target, desired)
            .await
            .map_err(|e| Error::StatusStore(e.to_string()))?;

        info!(
            "Updated status of {} (version {})",
            updated.name, updated.resource_version
        );

        Ok(WriteOutcome::Written)
    }
}
