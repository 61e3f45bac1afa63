//! Fire-and-forget collaborator calls with completion polling

use crate::optimistic::{Entity, MutationTicket, OptimisticAction, OptimisticCollection};
use cadence_core::CoreError;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Result of a finished collaborator call
///
/// A successful call may carry a follow-up action holding a value only the
/// collaborator could produce.
pub(crate) struct Completion<T: Entity> {
    ticket: MutationTicket,
    result: Result<Option<OptimisticAction<T>>, CoreError>,
}

/// What happened to a mutation, as reported by [`poll_completions`]
///
/// [`poll_completions`]: crate::PlaylistStore::poll_completions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationReport {
    Settled(MutationTicket),
    Failed {
        ticket: MutationTicket,
        message: String,
    },
}

impl MutationReport {
    pub fn ticket(&self) -> MutationTicket {
        match self {
            Self::Settled(ticket) | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Spawns collaborator calls and collects their completions
pub(crate) struct MutationRunner<T: Entity> {
    tx: mpsc::UnboundedSender<Completion<T>>,
    rx: mpsc::UnboundedReceiver<Completion<T>>,
}

impl<T: Entity> MutationRunner<T> {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Run `call` as a detached task
    ///
    /// Outside a Tokio runtime the call cannot run; it completes immediately
    /// as a failure so the optimistic entry follows the failure policy.
    pub(crate) fn spawn<F>(&self, ticket: MutationTicket, call: F)
    where
        F: Future<Output = Result<Option<OptimisticAction<T>>, CoreError>> + Send + 'static,
    {
        let tx = self.tx.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let result = call.await;
                    // Receiver gone means the store was dropped; nothing to report to
                    let _ = tx.send(Completion { ticket, result });
                });
            }
            Err(e) => {
                warn!(%ticket, error = %e, "No async runtime for mutation");
                let _ = tx.send(Completion {
                    ticket,
                    result: Err(CoreError::Other(format!("no async runtime: {e}"))),
                });
            }
        }
    }

    /// Apply every completion received so far to `collection`
    pub(crate) fn poll(&mut self, collection: &mut OptimisticCollection<T>) -> Vec<MutationReport> {
        let mut reports = Vec::new();

        while let Ok(Completion { ticket, result }) = self.rx.try_recv() {
            match result {
                Ok(follow_up) => {
                    debug!(%ticket, "Mutation settled");
                    collection.settle(ticket);
                    if let Some(action) = follow_up {
                        collection.apply_confirmed(action, ticket);
                    }
                    reports.push(MutationReport::Settled(ticket));
                }
                Err(e) => {
                    warn!(%ticket, error = %e, policy = ?collection.policy(), "Mutation failed");
                    let message = e.to_string();
                    collection.fail(ticket, message.clone());
                    reports.push(MutationReport::Failed { ticket, message });
                }
            }
        }

        reports
    }
}
