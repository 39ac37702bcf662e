//! One aggregation pass over the fleet.

use std::sync::Arc;

use chrono::Utc;
use fleet_members::MemberSource;
use fleet_status_store::StatusStore;
use tracing::{debug, error, info, warn};

use crate::builder::StatusBuilder;
use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::inspector::inspect;
use crate::writer::StatusWriter;

/// Reason reported when the fleet has no members.
pub const REASON_NO_MEMBERS: &str = "No POs Found";

/// Reason reported when at least one member is failing.
pub const REASON_MEMBER_FAILING: &str = "PO In An Error State";

/// Reason reported when every member is healthy.
pub const REASON_ALL_HEALTHY: &str = "POs Are Healthy";

/// Message reported when every member is healthy.
pub const MESSAGE_ALL_HEALTHY: &str = "All POs in a successful state";

/// Terminal state reached by one aggregation pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// The fleet has no members.
    NoMembers,

    /// Every member is healthy.
    Healthy {
        /// Number of members inspected.
        members: usize,
    },

    /// At least one member is failing.
    Failing {
        /// Names of failing members, one per failing condition.
        failing: Vec<String>,

        /// The aggregated failure message written to `Available`.
        message: String,
    },
}

/// Folds the health of every member into the composite target's status.
pub struct Aggregator<M, S>
where
    M: MemberSource,
    S: StatusStore,
{
    config: AggregatorConfig,
    members: Arc<M>,
    store: Arc<S>,
    writer: StatusWriter<S>,
}

impl<M, S> Aggregator<M, S>
where
    M: MemberSource,
    S: StatusStore,
{
    /// Creates an aggregator with default configuration.
    pub fn new(members: Arc<M>, store: Arc<S>) -> Self {
        Self::with_config(members, store, AggregatorConfig::default())
    }

    /// Creates an aggregator with custom configuration.
    pub fn with_config(members: Arc<M>, store: Arc<S>, config: AggregatorConfig) -> Self {
        Self {
            config,
            members,
            writer: StatusWriter::new(store.clone()),
            store,
        }
    }

    /// The aggregator's configuration.
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Runs one aggregation pass.
    ///
    /// Returns `Ok(None)` without writing anything when the composite target
    /// does not exist. Once the target has been fetched the status write is
    /// attempted on every path, including when listing members fails; in that
    /// case the target is left in the initial "evaluating" state. Write failures
    /// are logged and left for the next pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be fetched or the members cannot
    /// be listed.
    pub async fn reconcile(&self) -> Result<Option<Verdict>> {
        let name = &self.config.target_name;
        info!("Reconciling composite target {}", name);

        let Some(target) = self
            .store
            .get(name)
            .await
            .map_err(|e| Error::StatusStore(e.to_string()))?
        else {
            debug!("Composite target {} not found, nothing to do", name);
            return Ok(None);
        };

        let mut builder = StatusBuilder::new(target.status.clone(), Utc::now());
        builder
            .with_progressing(true, "")
            .with_degraded(false)
            .with_available(false, "", "");

        let verdict = self.evaluate(&mut builder).await;

        if let Err(e) = self.writer.update_status(&target, builder.status()).await {
            error!("Error updating status of {}: {}", name, e);
        }

        match &verdict {
            Ok(verdict) => info!("Finished reconciling {}: {:?}", name, verdict),
            Err(e) => warn!("Reconciling {} did not complete: {}", name, e),
        }

        verdict.map(Some)
    }

    async fn evaluate(&self, builder: &mut StatusBuilder) -> Result<Verdict> {
        let members = self.members.list().await.map_err(|e| {
            error!("Error listing members: {}", e);
            Error::MemberSource(e.to_string())
        })?;

        // Progressing is not cleared on an empty fleet.
        if members.is_empty() {
            builder.with_available(true, REASON_NO_MEMBERS, "");
            return Ok(Verdict::NoMembers);
        }

        if let Some(report) = inspect(&members) {
            let message = report.message();

            builder
                .with_degraded(true)
                .with_available(false, REASON_MEMBER_FAILING, &message);

            return Ok(Verdict::Failing {
                failing: report
                    .failing_members
                    .iter()
                    .map(|m| m.name().to_string())
                    .collect(),
                message,
            });
        }

        builder.with_available(true, REASON_ALL_HEALTHY, MESSAGE_ALL_HEALTHY);

        Ok(Verdict::Healthy {
            members: members.len(),
        })
    }
}
