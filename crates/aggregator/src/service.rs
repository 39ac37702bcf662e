//! Background loop re-running the aggregation on change notifications.

use std::sync::Arc;
use std::time::Duration;

use fleet_members::MemberSource;
use fleet_status_store::StatusStore;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::aggregator::Aggregator;
use crate::error::{Error, Result};

/// Time allowed for the loop to exit on shutdown.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A change that may affect the composite status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// A composite target with the given name was created or updated.
    Target(String),

    /// The named member was created, updated or deleted.
    Member(String),
}

struct ServiceState {
    receiver: Option<mpsc::Receiver<Trigger>>,
    task: Option<JoinHandle<()>>,
    shutdown_signal: Option<oneshot::Sender<()>>,
}

/// Runs the aggregator whenever the composite target or any member changes.
///
/// Triggers for other targets are dropped. Triggers queued while a pass is
/// running are coalesced into a single follow-up pass.
pub struct AggregatorService<M, S>
where
    M: MemberSource,
    S: StatusStore,
{
    aggregator: Arc<Aggregator<M, S>>,
    sender: mpsc::Sender<Trigger>,
    state: Mutex<ServiceState>,
}

impl<M, S> AggregatorService<M, S>
where
    M: MemberSource,
    S: StatusStore,
{
    /// Creates a stopped service around `aggregator`.
    pub fn new(aggregator: Aggregator<M, S>) -> Self {
        let (sender, receiver) = mpsc::channel(aggregator.config().trigger_buffer.max(1));

        Self {
            aggregator: Arc::new(aggregator),
            sender,
            state: Mutex::new(ServiceState {
                receiver: Some(receiver),
                task: None,
                shutdown_signal: None,
            }),
        }
    }

    /// Handle used by watchers to deliver change notifications.
    pub fn triggers(&self) -> mpsc::Sender<Trigger> {
        self.sender.clone()
    }

    /// Starts the background loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the service was already started.
    pub async fn start(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let mut receiver = state.receiver.take().ok_or(Error::AlreadyStarted)?;

        let target_name = self.aggregator.config().target_name.clone();
        info!("Starting aggregator service for {}", target_name);

        let aggregator = self.aggregator.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        debug!("Aggregator service received shutdown signal");
                        break;
                    }
                    trigger = receiver.recv() => {
                        let Some(trigger) = trigger else {
                            debug!("Trigger channel closed");
                            break;
                        };

                        let mut relevant = is_relevant(&trigger, &target_name);
                        while let Ok(queued) = receiver.try_recv() {
                            relevant |= is_relevant(&queued, &target_name);
                        }

                        if !relevant {
                            debug!("Ignoring {:?}", trigger);
                            continue;
                        }

                        if let Err(e) = aggregator.reconcile().await {
                            warn!("Aggregation pass failed: {}", e);
                        }
                    }
                }
            }
        });

        state.task = Some(task);
        state.shutdown_signal = Some(shutdown_tx);

        Ok(())
    }

    /// Stops the background loop, waiting briefly for an in-flight pass.
    pub async fn shutdown(&self) {
        info!(
            "Shutting down aggregator service for {}",
            self.aggregator.config().target_name
        );

        let mut state = self.state.lock().await;

        if let Some(shutdown_signal) = state.shutdown_signal.take() {
            let _ = shutdown_signal.send(());
        }

        if let Some(task) = state.task.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
                Ok(Ok(())) => debug!("Aggregator service task completed"),
                Ok(Err(e)) => warn!("Aggregator service task failed: {}", e),
                Err(_) => warn!("Aggregator service task timed out"),
            }
        }
    }
}

fn is_relevant(trigger: &Trigger, target_name: &str) -> bool {
    match trigger {
        Trigger::Target(name) => name == target_name,
        Trigger::Member(_) => true,
    }
}
