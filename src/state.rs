//! History bookkeeping.
//!
//! [`HistoryState`] is the entry list, the last committed position and the
//! pending navigation, with the list surgery needed to keep them consistent.
//! It never talks to a host or observer; the
//! [`NavigationController`](crate::NavigationController) wraps it with that.

use crate::{trace_log, ContentType, NavigationEntry, SiteInstanceId};

/// The navigation currently in flight, if any.
#[derive(Debug, Clone, Default)]
pub enum Pending {
    /// Nothing in flight.
    #[default]
    None,
    /// A brand-new navigation whose entry is not in the list yet.
    New(NavigationEntry),
    /// A session-history navigation to the entry at this index.
    Existing(usize),
}

/// Entry list, last committed position and pending navigation.
///
/// Read-only outside the crate; only the controller moves it between
/// states.
///
/// ```compile_fail
/// use session_navigator::{HistoryState, Pending};
///
/// let mut state = HistoryState::new();
/// state.set_pending(Pending::Existing(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    /// Oldest first.
    entries: Vec<NavigationEntry>,
    last_committed: Option<usize>,
    pending: Pending,
}

impl HistoryState {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&NavigationEntry> {
        self.entries.get(index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut NavigationEntry> {
        self.entries.get_mut(index)
    }

    pub fn last_committed_index(&self) -> Option<usize> {
        self.last_committed
    }

    pub fn last_committed_entry(&self) -> Option<&NavigationEntry> {
        self.last_committed.and_then(|index| self.entries.get(index))
    }

    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    /// The pending entry, wherever it lives.
    pub fn pending_entry(&self) -> Option<&NavigationEntry> {
        match &self.pending {
            Pending::None => None,
            Pending::New(entry) => Some(entry),
            Pending::Existing(index) => self.entries.get(*index),
        }
    }

    /// List index of the pending entry, `None` when nothing is pending or the
    /// pending entry is brand new.
    pub fn pending_index(&self) -> Option<usize> {
        match self.pending {
            Pending::Existing(index) => Some(index),
            Pending::None | Pending::New(_) => None,
        }
    }

    /// The position the user is looking at or heading to: the pending
    /// history index if there is one, else the last committed index.
    pub fn current_index(&self) -> Option<usize> {
        self.pending_index().or(self.last_committed)
    }

    /// Most recent index whose entry matches all three keys.
    pub fn index_with_page_id(
        &self,
        content_type: ContentType,
        site_instance: Option<SiteInstanceId>,
        page_id: i32,
    ) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|entry| entry.matches_page(content_type, site_instance, page_id))
    }

    // ========================================================================
    // Pending
    // ========================================================================

    pub(crate) fn set_pending(&mut self, pending: Pending) {
        self.pending = pending;
    }

    /// Forget the pending navigation. A brand-new pending entry is dropped;
    /// an entry already in the list stays there.
    ///
    /// Returns whether anything was pending.
    pub(crate) fn clear_pending(&mut self) -> bool {
        !matches!(std::mem::take(&mut self.pending), Pending::None)
    }

    // ========================================================================
    // List surgery
    // ========================================================================

    pub(crate) fn set_last_committed(&mut self, index: Option<usize>) {
        debug_assert!(index.map_or(true, |i| i < self.entries.len()));
        self.last_committed = index;
    }

    /// Drop every entry after the last committed one. With nothing committed
    /// the whole list goes.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn prune_forward(&mut self) -> usize {
        let keep = self.last_committed.map_or(0, |index| index + 1);
        let removed = self.entries.len().saturating_sub(keep);
        if removed > 0 {
            self.entries.truncate(keep);
            if matches!(self.pending, Pending::Existing(index) if index >= keep) {
                self.pending = Pending::None;
            }
            trace_log!("Pruned {} forward entries (kept {})", removed, keep);
        }
        removed
    }

    /// Remove the oldest entry and shift positions down.
    pub(crate) fn evict_oldest(&mut self) -> Option<NavigationEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let evicted = self.remove(0);
        trace_log!("Evicted oldest entry (page {})", evicted.page_id());
        Some(evicted)
    }

    /// Append an entry and make it the last committed one.
    pub(crate) fn push_committed(&mut self, entry: NavigationEntry) -> usize {
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        self.last_committed = Some(index);
        index
    }

    /// Remove the entry at `index`, shifting the last committed and pending
    /// positions so they keep naming the same entries.
    ///
    /// A position that named the removed entry itself is cleared (last
    /// committed falls back to the previous entry). The caller checks
    /// bounds.
    pub(crate) fn remove(&mut self, index: usize) -> NavigationEntry {
        let removed = self.entries.remove(index);

        self.last_committed = match self.last_committed {
            Some(committed) if committed > index => Some(committed - 1),
            Some(committed) if committed == index => committed.checked_sub(1),
            other => other,
        };
        if self.entries.is_empty() {
            self.last_committed = None;
        }

        match self.pending {
            Pending::Existing(pending) if pending > index => {
                self.pending = Pending::Existing(pending - 1);
            }
            Pending::Existing(pending) if pending == index => self.pending = Pending::None,
            _ => {}
        }

        removed
    }

    /// Replace the whole list, e.g. when restoring a saved session.
    pub(crate) fn replace_entries(&mut self, entries: Vec<NavigationEntry>, last_committed: Option<usize>) {
        self.entries = entries;
        self.pending = Pending::None;
        self.set_last_committed(last_committed);
    }

    /// Drop every entry and the pending navigation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.last_committed = None;
        self.pending = Pending::None;
    }
}

// ============================================================================
// Tests
// ============================================================================
