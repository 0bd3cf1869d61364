use core::mem;
use std::collections::HashMap;

use super::errors::ShareChainError;
use super::share::{ShareHeader, ShareId};
use super::state::ShareChainState;

/// Tracks the accumulator state of competing share chain tips.
///
/// One state is "active" (the tip shares are mined on); the others are
/// retained snapshots keyed by their tip id. Switching the active tip is
/// an O(1) exchange of internal state, never a peak-by-peak copy, so a
/// reorganization between candidate tips costs the same regardless of how
/// many shares each tip accumulated.
///
/// The tracker performs no locking: it is owned by whichever component
/// serializes share validation, and persistence of retained snapshots is
/// left to the caller.
#[derive(Clone)]
pub struct TipTracker {
    active: ShareChainState,
    snapshots: HashMap<ShareId, ShareChainState>,
    finality_depth: u32,
}

impl TipTracker {
    /// Creates a tracker with the given active state. Snapshots whose tip
    /// falls more than `finality_depth` shares below the active height are
    /// considered final and become eligible for pruning.
    pub fn new(state: ShareChainState, finality_depth: u32) -> Self {
        TipTracker {
            active: state,
            snapshots: HashMap::new(),
            finality_depth,
        }
    }

    /// Returns the currently active chain state.
    pub fn active(&self) -> &ShareChainState {
        &self.active
    }

    /// Returns the id of the active tip.
    pub fn active_tip(&self) -> ShareId {
        self.active.tip.id()
    }

    /// Returns the retained snapshot with the given tip id, if any.
    pub fn snapshot(&self, id: &ShareId) -> Option<&ShareChainState> {
        self.snapshots.get(id)
    }

    /// Returns an iterator over the retained snapshots.
    pub fn snapshots(&self) -> impl Iterator<Item = &ShareChainState> {
        self.snapshots.values()
    }

    /// Applies a share on top of whichever tracked tip it extends and makes
    /// the resulting state active. The previously active state is retained
    /// as a snapshot so the chain can be reorganized back to it.
    pub fn extend(&mut self, share: ShareHeader) -> Result<&ShareChainState, ShareChainError> {
        let next = if share.prev == self.active.tip.id() {
            self.active.apply_share(share)?
        } else {
            let base = self
                .snapshots
                .get(&share.prev)
                .ok_or(ShareChainError::UnknownTip)?;
            base.apply_share(share)?
        };

        let displaced = mem::replace(&mut self.active, next);
        self.snapshots.insert(displaced.tip.id(), displaced);
        Ok(&self.active)
    }

    /// Makes a retained tip active, exchanging the two states in O(1).
    /// The previously active state is re-filed under its own tip id.
    pub fn switch_to(&mut self, id: &ShareId) -> Result<&ShareChainState, ShareChainError> {
        let mut snapshot = self
            .snapshots
            .remove(id)
            .ok_or(ShareChainError::UnknownTip)?;

        mem::swap(&mut self.active, &mut snapshot);

        // `snapshot` now holds the displaced state.
        self.snapshots.insert(snapshot.tip.id(), snapshot);
        Ok(&self.active)
    }

    /// Drops every retained snapshot whose tip is more than the finality
    /// depth below the active height: the chain can no longer reorganize
    /// onto those tips.
    pub fn prune(&mut self) {
        let horizon = self.active.tip.height.saturating_sub(self.finality_depth);
        self.snapshots.retain(|_, state| state.tip.height >= horizon);
    }
}
