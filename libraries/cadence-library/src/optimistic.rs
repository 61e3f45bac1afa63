//! Optimistic collections
//!
//! A server-confirmed baseline overlaid with not-yet-confirmed local
//! mutations. The visible collection is always the fold of the pending
//! actions over the baseline, in submission order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// An item an optimistic collection can hold
pub trait Entity: Clone + fmt::Debug + Send + 'static {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + 'static;

    /// Partial update merged into an existing item
    type Patch: Clone + fmt::Debug + Send + 'static;

    fn id(&self) -> &Self::Id;

    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// A speculative change to the collection
#[derive(Debug, Clone)]
pub enum OptimisticAction<T: Entity> {
    /// Append the item unless its identity is already present
    Insert(T),
    /// Merge a patch into the item with this identity
    Update { id: T::Id, patch: T::Patch },
    /// Remove the item with this identity
    Delete(T::Id),
}

impl<T: Entity> OptimisticAction<T> {
    pub fn target(&self) -> &T::Id {
        match self {
            Self::Insert(item) => item.id(),
            Self::Update { id, .. } | Self::Delete(id) => id,
        }
    }
}

/// Apply one action to a collection
///
/// Unmatched identities are no-ops, so a delete dominates every later
/// update of the same item.
pub fn reduce<T: Entity>(items: &mut Vec<T>, action: &OptimisticAction<T>) {
    match action {
        OptimisticAction::Insert(item) => {
            if !items.iter().any(|existing| existing.id() == item.id()) {
                items.push(item.clone());
            }
        }
        OptimisticAction::Update { id, patch } => {
            for item in items.iter_mut().filter(|item| item.id() == id) {
                item.apply_patch(patch);
            }
        }
        OptimisticAction::Delete(id) => items.retain(|item| item.id() != id),
    }
}

/// Identifies one submitted mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationTicket(u64);

impl MutationTicket {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MutationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a pending mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    /// Collaborator call not finished yet
    InFlight,
    /// Collaborator confirmed the write
    Settled,
    /// Collaborator rejected or failed the write
    Failed(String),
}

/// What to do with an optimistic entry whose mutation failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep showing the change until the next baseline refresh
    #[default]
    Retain,
    /// Drop the change as soon as the failure is known
    Rollback,
}

/// A pending local mutation
#[derive(Debug, Clone)]
pub struct PendingEntry<T: Entity> {
    pub ticket: MutationTicket,
    pub action: OptimisticAction<T>,
    pub status: MutationStatus,
}

/// Baseline plus pending mutations, exposed as one read model
#[derive(Debug, Clone)]
pub struct OptimisticCollection<T: Entity> {
    baseline: Vec<T>,
    pending: Vec<PendingEntry<T>>,
    visible: Vec<T>,
    policy: FailurePolicy,
    next_ticket: u64,
}

impl<T: Entity> OptimisticCollection<T> {
    pub fn new(baseline: Vec<T>, policy: FailurePolicy) -> Self {
        Self {
            visible: baseline.clone(),
            baseline,
            pending: Vec::new(),
            policy,
            next_ticket: 1,
        }
    }

    /// Current read model
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// Last server-confirmed state
    pub fn baseline(&self) -> &[T] {
        &self.baseline
    }

    pub fn pending(&self) -> &[PendingEntry<T>] {
        &self.pending
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.visible.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Reserve a ticket for a new mutation
    pub fn issue_ticket(&mut self) -> MutationTicket {
        let ticket = MutationTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    /// Layer a speculative action over the baseline
    pub fn apply_optimistic(&mut self, action: OptimisticAction<T>, ticket: MutationTicket) {
        self.push(action, ticket, MutationStatus::InFlight);
    }

    /// Layer an action the collaborator already confirmed
    ///
    /// Used for values only the collaborator can produce (uploaded asset
    /// references). Survives until the next baseline refresh.
    pub fn apply_confirmed(&mut self, action: OptimisticAction<T>, ticket: MutationTicket) {
        self.push(action, ticket, MutationStatus::Settled);
    }

    fn push(&mut self, action: OptimisticAction<T>, ticket: MutationTicket, status: MutationStatus) {
        reduce(&mut self.visible, &action);
        self.pending.push(PendingEntry {
            ticket,
            action,
            status,
        });
    }

    /// Mark a mutation as confirmed
    pub fn settle(&mut self, ticket: MutationTicket) {
        for entry in self.pending.iter_mut().filter(|e| e.ticket == ticket) {
            entry.status = MutationStatus::Settled;
        }
    }

    /// Mark a mutation as failed and apply the failure policy
    pub fn fail(&mut self, ticket: MutationTicket, reason: impl Into<String>) {
        match self.policy {
            FailurePolicy::Retain => {
                let reason = reason.into();
                for entry in self.pending.iter_mut().filter(|e| e.ticket == ticket) {
                    entry.status = MutationStatus::Failed(reason.clone());
                }
            }
            FailurePolicy::Rollback => {
                self.pending.retain(|e| e.ticket != ticket);
                self.recompute();
            }
        }
    }

    /// Replace the baseline with fresh server state
    ///
    /// Entries whose mutation has finished are dropped; in-flight entries
    /// are replayed over the new baseline.
    pub fn refresh_baseline(&mut self, items: Vec<T>) {
        self.baseline = items;
        self.pending
            .retain(|entry| entry.status == MutationStatus::InFlight);
        self.recompute();
    }

    /// Number of mutations still waiting on the collaborator
    pub fn in_flight(&self) -> usize {
        self.pending
            .iter()
            .filter(|e| e.status == MutationStatus::InFlight)
            .count()
    }

    fn recompute(&mut self) {
        let mut visible = self.baseline.clone();
        for entry in &self.pending {
            reduce(&mut visible, &entry.action);
        }
        self.visible = visible;
    }
}
