//! The session history controller.
//!
//! [`NavigationController`] owns a tab's back/forward list and the navigation
//! currently in flight. Callers ask it to navigate
//! ([`load_entry`](NavigationController::load_entry),
//! [`go_back`](NavigationController::go_back),
//! [`reload`](NavigationController::reload), …); it records the pending
//! navigation and hands it to its [`NavigationHost`]. When the host later
//! reports the finished load through
//! [`did_navigate_to_entry`](NavigationController::did_navigate_to_entry),
//! the controller decides whether that load is a new page, a revisit of an
//! existing entry, or a stale report, and updates the list.
//!
//! # Lifecycle of a navigation
//!
//! 1. **Pending**: `load_entry` stores a brand-new entry as pending;
//!    `go_back`/`go_forward`/`go_to_index`/`reload` point the pending
//!    navigation at an existing list index.
//! 2. **Issued**: the host's `navigate_to_pending_entry` is called.
//! 3. **Committed**: the host calls `did_navigate_to_entry` with what was
//!    actually loaded, and the pending navigation is resolved.
//!
//! Starting another navigation before step 3 simply replaces the pending
//! one. A late report for the abandoned navigation either matches an entry
//! in the list (and updates it) or matches nothing and is ignored.
//!
//! # Example
//!
//! ```
//! use session_navigator::{ContentType, NavigationController, NavigationEntry, NavigationHost};
//! use url::Url;
//!
//! #[derive(Default)]
//! struct Tab {
//!     max_page_id: i32,
//! }
//!
//! impl NavigationHost for Tab {
//!     fn max_page_id(&self) -> i32 {
//!         self.max_page_id
//!     }
//!
//!     fn navigate_to_pending_entry(&mut self, _entry: &NavigationEntry, _reload: bool) {}
//! }
//!
//! let mut controller = NavigationController::new(Tab { max_page_id: -1 });
//! let url = Url::parse("https://example.com/").unwrap();
//!
//! controller.load_entry(NavigationEntry::new(ContentType::Web, url.clone()));
//! assert!(controller.pending_entry().is_some());
//!
//! // The renderer finished loading and assigned page ID 0.
//! let loaded = NavigationEntry::new(ContentType::Web, url).with_page_id(0);
//! let outcome = controller.did_navigate_to_entry(loaded);
//!
//! assert!(outcome.is_new_entry());
//! assert_eq!(controller.entry_count(), 1);
//! assert!(controller.pending_entry().is_none());
//! ```

use crate::error::{CommitOutcome, NavigationError, Result};
use crate::state::{HistoryState, Pending};
use crate::{
    debug_log, info_log, trace_log, warn_log, ContentType, ControllerConfig, NavigationEntry,
    NavigationHost, NavigationObserver, PageTransition, SiteInstanceId,
};
use std::fmt;
use std::sync::Arc;

/// A tab's session history.
///
/// Generic over the [`NavigationHost`] that performs the loads. The host is
/// owned by the controller; reach it through [`host`](Self::host) and
/// [`host_mut`](Self::host_mut).
pub struct NavigationController<H: NavigationHost> {
    state: HistoryState,
    host: H,
    observers: Vec<Arc<dyn NavigationObserver>>,
    config: ControllerConfig,
}

impl<H: NavigationHost> NavigationController<H> {
    /// Create a controller with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, ControllerConfig::default())
    }

    /// Create a controller with a custom configuration.
    pub fn with_config(host: H, config: ControllerConfig) -> Self {
        Self {
            state: HistoryState::new(),
            host,
            observers: Vec::new(),
            config,
        }
    }

    /// Register an observer for pending and committed navigations.
    pub fn add_observer(&mut self, observer: Arc<dyn NavigationObserver>) {
        debug_log!("Registered navigation observer '{}'", observer.name());
        self.observers.push(observer);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Read-only view of the underlying history bookkeeping.
    pub fn history(&self) -> &HistoryState {
        &self.state
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn max_entry_count(&self) -> usize {
        self.config.max_entry_count()
    }

    pub fn entry_count(&self) -> usize {
        self.state.len()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[NavigationEntry] {
        self.state.entries()
    }

    pub fn entry_at_index(&self, index: usize) -> Option<&NavigationEntry> {
        self.state.entry(index)
    }

    /// Entry `offset` steps away from the current position.
    pub fn entry_at_offset(&self, offset: isize) -> Option<&NavigationEntry> {
        let index = self.state.current_index()?.checked_add_signed(offset)?;
        self.state.entry(index)
    }

    pub fn last_committed_entry(&self) -> Option<&NavigationEntry> {
        self.state.last_committed_entry()
    }

    pub fn last_committed_entry_index(&self) -> Option<usize> {
        self.state.last_committed_index()
    }

    pub fn pending_entry(&self) -> Option<&NavigationEntry> {
        self.state.pending_entry()
    }

    /// List index of the pending entry; `None` when nothing is pending or the
    /// pending entry is a brand-new navigation.
    pub fn pending_entry_index(&self) -> Option<usize> {
        self.state.pending_index()
    }

    /// The entry the tab should display: the pending one if a navigation is
    /// in flight, else the last committed one.
    pub fn active_entry(&self) -> Option<&NavigationEntry> {
        self.state
            .pending_entry()
            .or_else(|| self.state.last_committed_entry())
    }

    /// Pending history index if one is set, else the last committed index.
    pub fn current_entry_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn entry_index_with_page_id(
        &self,
        content_type: ContentType,
        site_instance: Option<SiteInstanceId>,
        page_id: i32,
    ) -> Option<usize> {
        self.state
            .index_with_page_id(content_type, site_instance, page_id)
    }

    pub fn entry_with_page_id(
        &self,
        content_type: ContentType,
        site_instance: Option<SiteInstanceId>,
        page_id: i32,
    ) -> Option<&NavigationEntry> {
        self.entry_index_with_page_id(content_type, site_instance, page_id)
            .and_then(|index| self.state.entry(index))
    }

    pub fn can_go_back(&self) -> bool {
        self.state.len() > 1 && matches!(self.current_entry_index(), Some(index) if index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.current_entry_index(), Some(index) if index + 1 < self.state.len())
    }

    /// Whether [`go_to_offset`](Self::go_to_offset) would navigate.
    pub fn can_go_to_offset(&self, offset: isize) -> bool {
        self.offset_target(offset).is_some()
    }

    fn offset_target(&self, offset: isize) -> Option<usize> {
        let index = self
            .state
            .last_committed_index()?
            .checked_add_signed(offset)?;
        (index < self.state.len()).then_some(index)
    }

    // ========================================================================
    // Starting navigations
    // ========================================================================

    /// Go back one entry.
    ///
    /// # Panics
    ///
    /// Panics if [`can_go_back`](Self::can_go_back) is false.
    pub fn go_back(&mut self) {
        if let Err(err) = self.try_go_back() {
            panic!("{err}");
        }
    }

    /// Go back one entry, or report why not.
    pub fn try_go_back(&mut self) -> Result<()> {
        if !self.can_go_back() {
            return Err(NavigationError::CannotGoBack);
        }
        let current = self.current_history_index();
        self.navigate_to_index(current - 1);
        Ok(())
    }

    /// Go forward one entry.
    ///
    /// # Panics
    ///
    /// Panics if [`can_go_forward`](Self::can_go_forward) is false.
    pub fn go_forward(&mut self) {
        if let Err(err) = self.try_go_forward() {
            panic!("{err}");
        }
    }

    /// Go forward one entry, or report why not.
    pub fn try_go_forward(&mut self) -> Result<()> {
        if !self.can_go_forward() {
            return Err(NavigationError::CannotGoForward);
        }
        let current = self.current_history_index();
        self.navigate_to_index(current + 1);
        Ok(())
    }

    /// Navigate to the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn go_to_index(&mut self, index: usize) {
        if let Err(err) = self.try_go_to_index(index) {
            panic!("{err}");
        }
    }

    /// Navigate to the entry at `index`, or report that it does not exist.
    pub fn try_go_to_index(&mut self, index: usize) -> Result<()> {
        let len = self.state.len();
        if index >= len {
            return Err(NavigationError::IndexOutOfRange { index, len });
        }
        self.navigate_to_index(index);
        Ok(())
    }

    /// Navigate `offset` entries away from the last committed entry. Does
    /// nothing if that falls outside the history.
    pub fn go_to_offset(&mut self, offset: isize) {
        match self.offset_target(offset) {
            Some(index) => self.navigate_to_index(index),
            None => {
                debug_log!("Ignoring go_to_offset({}): out of range", offset);
            }
        }
    }

    /// Reload the current entry. Does nothing if there is none.
    pub fn reload(&mut self) {
        let Some(index) = self.current_entry_index() else {
            debug_log!("Ignoring reload: no current entry");
            return;
        };
        self.discard_pending_entry_internal();
        self.state.set_pending(Pending::Existing(index));
        if let Some(entry) = self.state.entry_mut(index) {
            entry.set_transition_type(PageTransition::Reload);
        }
        self.issue_pending(true);
    }

    /// Start a brand-new navigation to `entry`.
    ///
    /// Any navigation already in flight is abandoned. Observers are told
    /// about the new pending entry before the host starts loading it.
    pub fn load_entry(&mut self, entry: NavigationEntry) {
        self.discard_pending_entry_internal();
        self.state.set_pending(Pending::New(entry));
        if let Some(pending) = self.state.pending_entry() {
            for observer in &self.observers {
                observer.on_navigation_pending(pending);
            }
        }
        self.issue_pending(false);
    }

    /// Abandon the pending navigation and let the host clean up after it.
    ///
    /// Calling this with nothing pending only re-notifies the host.
    pub fn discard_pending_entry(&mut self) {
        self.discard_pending_entry_internal();
        self.host.pending_entry_discarded();
    }

    fn discard_pending_entry_internal(&mut self) {
        if self.state.clear_pending() {
            debug_log!("Discarded pending navigation");
        }
    }

    /// Index the user is at or heading to. Only called once `can_go_*` has
    /// established there is one.
    fn current_history_index(&self) -> usize {
        self.current_entry_index().unwrap_or_default()
    }

    fn navigate_to_index(&mut self, index: usize) {
        self.discard_pending_entry();
        self.state.set_pending(Pending::Existing(index));
        self.issue_pending(false);
    }

    fn issue_pending(&mut self, reload: bool) {
        if let Some(entry) = self.state.pending_entry() {
            debug_log!(
                "Navigating to '{}' (pending index: {:?}, reload: {})",
                entry.url(),
                self.state.pending_index(),
                reload
            );
            self.host.navigate_to_pending_entry(entry, reload);
        }
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Reconcile a load reported by the host with the history.
    ///
    /// - A page ID above the host's maximum is a new navigation: the entry is
    ///   appended, pruning forward history.
    /// - A page ID matching an existing entry updates that entry in place and
    ///   makes it the last committed one.
    /// - A page ID matching nothing is a stale report and changes nothing.
    ///
    /// Observers hear about the commit in every case.
    pub fn did_navigate_to_entry(&mut self, mut entry: NavigationEntry) -> CommitOutcome {
        if entry.content_state().is_empty() {
            self.host.ensure_content_state(&mut entry);
        }
        entry.set_restored(false);

        if entry.page_id() > self.host.max_page_id() {
            let index = self.insert_entry(entry);
            self.notify_committed();
            return CommitOutcome::NewEntry { index };
        }

        let outcome = self.commit_existing(&entry);
        drop(entry);
        self.notify_committed();
        outcome
    }

    fn commit_existing(&mut self, entry: &NavigationEntry) -> CommitOutcome {
        let Some(existing_index) = self.state.index_with_page_id(
            entry.content_type(),
            entry.site_instance(),
            entry.page_id(),
        ) else {
            warn_log!(
                "Ignoring navigation to '{}': no entry with page ID {}",
                entry.url(),
                entry.page_id()
            );
            return CommitOutcome::Ignored {
                page_id: entry.page_id(),
            };
        };

        // The user re-requested the URL of an existing page and the renderer
        // reused its page ID.
        if let Pending::New(pending) = self.state.pending() {
            let same_url = self
                .state
                .entry(existing_index)
                .is_some_and(|existing| existing.url() == pending.url());
            if pending.is_new() && same_url {
                let unique_id = pending.unique_id();
                if let Some(existing) = self.state.entry_mut(existing_index) {
                    existing.set_unique_id(unique_id);
                }
                self.discard_pending_entry();
                info_log!(
                    "Navigation to '{}' landed on existing entry {}",
                    entry.url(),
                    existing_index
                );
                return CommitOutcome::SamePage {
                    index: existing_index,
                };
            }
        }

        // Client redirects and title/icon changes show up as a commit for a
        // page we already have. The unique ID stays so the UI does not treat
        // it as a new page.
        if let Some(existing) = self.state.entry_mut(existing_index) {
            existing.update_display_from(entry);
            existing.set_restored(false);
        }

        let previous = self.state.last_committed_index();
        if self.state.pending_index() == Some(existing_index) {
            self.state.set_last_committed(Some(existing_index));
            self.discard_pending_entry_internal();
        } else {
            // Renderer-initiated: the pending navigation, if any, is still
            // in flight.
            self.state.set_last_committed(Some(existing_index));
        }
        info_log!(
            "Committed existing entry {} ('{}'), previously {:?}",
            existing_index,
            entry.url(),
            previous
        );
        self.host.active_entry_index_changed(previous);

        CommitOutcome::ExistingEntry {
            index: existing_index,
            previous,
        }
    }

    fn notify_committed(&mut self) {
        self.host.navigation_state_changed();
        let committed = self.state.last_committed_entry();
        for observer in &self.observers {
            trace_log!("Notifying '{}' of commit", observer.name());
            observer.on_navigation_committed(committed);
        }
    }

    // ========================================================================
    // List mutation
    // ========================================================================

    /// Append a committed entry, making it the last committed one.
    ///
    /// Takes over the pending navigation's unique ID, drops everything after
    /// the last committed entry, and evicts the oldest entry when the history
    /// is full. Returns the new entry's index.
    ///
    /// # Panics
    ///
    /// Panics if the entry has an [`PageTransition::AutoSubframe`] transition.
    pub fn insert_entry(&mut self, entry: NavigationEntry) -> usize {
        match self.try_insert_entry(entry) {
            Ok(index) => index,
            Err(err) => panic!("{err}"),
        }
    }

    /// Append a committed entry, or report why it cannot be one.
    pub fn try_insert_entry(&mut self, mut entry: NavigationEntry) -> Result<usize> {
        if entry.transition_type() == PageTransition::AutoSubframe {
            return Err(NavigationError::SubframeEntry);
        }

        if let Some(pending) = self.state.pending_entry() {
            entry.set_unique_id(pending.unique_id());
        }
        self.discard_pending_entry_internal();

        if self.state.prune_forward() > 0 {
            self.host.pruned_entries();
        }

        if self.state.len() >= self.config.max_entry_count() {
            self.state.evict_oldest();
        }

        let index = self.state.push_committed(entry);
        info_log!(
            "Committed new entry {} (page ID {}), {} entries",
            index,
            self.state.entry(index).map_or(-1, NavigationEntry::page_id),
            self.state.len()
        );
        Ok(index)
    }

    /// Remove the newest entry.
    ///
    /// A pending navigation to that entry is abandoned first. The host is
    /// told about the prune whenever an entry was removed.
    pub fn remove_last_entry(&mut self) {
        let Some(last) = self.state.len().checked_sub(1) else {
            return;
        };
        if self.state.pending_index() == Some(last) {
            self.discard_pending_entry_internal();
        }
        self.state.remove(last);
        trace_log!("Removed last entry, {} remain", self.state.len());
        self.host.pruned_entries();
    }

    /// Remove the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or names the pending or last
    /// committed entry.
    pub fn remove_entry_at_index(&mut self, index: usize) {
        if let Err(err) = self.try_remove_entry_at_index(index) {
            panic!("{err}");
        }
    }

    /// Remove the entry at `index`, or report why it cannot be removed.
    pub fn try_remove_entry_at_index(&mut self, index: usize) -> Result<()> {
        let len = self.state.len();
        if index >= len {
            return Err(NavigationError::IndexOutOfRange { index, len });
        }
        if self.state.pending_index() == Some(index)
            || self.state.last_committed_index() == Some(index)
        {
            return Err(NavigationError::ProtectedIndex { index });
        }
        // TODO: hosts that mirror the list (session persistence) are not told
        // about single-entry removals; add a hook once one needs it.
        self.state.remove(index);
        trace_log!("Removed entry {}, {} remain", index, self.state.len());
        Ok(())
    }

    /// Replace an empty history with saved entries, e.g. on session restore.
    ///
    /// Restored entries are marked [`restored`](NavigationEntry::restored)
    /// until they are loaded again. If there are more entries than the
    /// history holds, the oldest ones are dropped, unless that would drop
    /// `selected`; then the newest ones go instead. `selected` becomes the
    /// last committed entry; nothing is loaded.
    pub fn restore(&mut self, entries: Vec<NavigationEntry>, selected: usize) -> Result<()> {
        if !self.state.is_empty() {
            return Err(NavigationError::NotEmpty {
                len: self.state.len(),
            });
        }
        let len = entries.len();
        if selected >= len {
            return Err(NavigationError::IndexOutOfRange {
                index: selected,
                len,
            });
        }

        // Keep the newest window that still holds the selected entry.
        let max = self.config.max_entry_count();
        let start = len.saturating_sub(max).min(selected);
        let entries: Vec<NavigationEntry> = entries
            .into_iter()
            .skip(start)
            .take(max)
            .map(|mut entry| {
                entry.set_restored(true);
                entry
            })
            .collect();
        let selected = selected - start;

        self.discard_pending_entry_internal();
        self.state.replace_entries(entries, Some(selected));
        info_log!(
            "Restored {} entries, selected {}",
            self.state.len(),
            selected
        );
        Ok(())
    }

    /// Drop every entry and the pending navigation. No host or observer is
    /// notified.
    pub fn reset(&mut self) {
        self.state.clear();
    }
}

impl<H: NavigationHost + fmt::Debug> fmt::Debug for NavigationController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state)
            .field("host", &self.host)
            .field("observers", &self.observers.len())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
