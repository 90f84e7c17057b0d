//! Host and observer interfaces.
//!
//! The controller knows nothing about how pages are actually loaded. Two
//! traits connect it to the rest of the browser:
//!
//! - [`NavigationHost`]: the tab that owns the controller. It starts loads,
//!   knows the highest page ID its renderer has handed out, and gets told
//!   about list changes. One host per controller, passed in at construction.
//! - [`NavigationObserver`]: anyone else interested in "a navigation is
//!   pending" and "a navigation committed" (tab strip, session persistence,
//!   location bar). Any number, registered with
//!   [`add_observer`](crate::NavigationController::add_observer).
//!
//! Everything is synchronous. The host is owned by the controller, so its
//! callbacks cannot reach back into the history while it is being mutated.
//!
//! # Example
//!
//! ```
//! use session_navigator::{NavigationEntry, NavigationHost};
//!
//! struct Tab {
//!     max_page_id: i32,
//!     loads: Vec<String>,
//! }
//!
//! impl NavigationHost for Tab {
//!     fn max_page_id(&self) -> i32 {
//!         self.max_page_id
//!     }
//!
//!     fn navigate_to_pending_entry(&mut self, entry: &NavigationEntry, _reload: bool) {
//!         self.loads.push(entry.url().to_string());
//!     }
//! }
//! ```

use crate::NavigationEntry;

// ============================================================================
// NavigationHost trait
// ============================================================================

/// The tab a [`NavigationController`](crate::NavigationController) drives.
///
/// Only [`max_page_id`](Self::max_page_id) and
/// [`navigate_to_pending_entry`](Self::navigate_to_pending_entry) are
/// required; the rest are notifications with empty defaults.
pub trait NavigationHost {
    /// Highest page ID this tab's renderer has ever assigned, or
    /// [`INVALID_PAGE_ID`](crate::INVALID_PAGE_ID) if none.
    ///
    /// A committed page with a larger ID is a new navigation; anything at or
    /// below it is a revisit of an existing entry.
    fn max_page_id(&self) -> i32;

    /// Start loading `entry`, the controller's pending entry.
    ///
    /// Must return immediately. When the load finishes, report it through
    /// [`did_navigate_to_entry`](crate::NavigationController::did_navigate_to_entry).
    fn navigate_to_pending_entry(&mut self, entry: &NavigationEntry, reload: bool);

    /// Fill in `entry`'s serialized page state. Called for committed loads
    /// that arrive without one.
    fn ensure_content_state(&mut self, entry: &mut NavigationEntry) {
        let _ = entry;
    }

    /// A navigation committed and the back/forward state may have changed.
    fn navigation_state_changed(&mut self) {}

    /// Entries were removed from the end of the history.
    fn pruned_entries(&mut self) {}

    /// The last committed entry moved to an existing entry. `previous` is
    /// the old last committed index.
    fn active_entry_index_changed(&mut self, previous: Option<usize>) {
        let _ = previous;
    }

    /// [`discard_pending_entry`](crate::NavigationController::discard_pending_entry)
    /// dropped the pending navigation. Called after the history is updated.
    fn pending_entry_discarded(&mut self) {}
}

// ============================================================================
// NavigationObserver trait
// ============================================================================

/// Listener for pending and committed navigations.
///
/// # Example
///
/// ```
/// use session_navigator::{NavigationEntry, NavigationObserver};
///
/// struct LocationBar;
///
/// impl NavigationObserver for LocationBar {
///     fn on_navigation_pending(&self, entry: &NavigationEntry) {
///         println!("Loading {}", entry.url());
///     }
///
///     fn on_navigation_committed(&self, entry: Option<&NavigationEntry>) {
///         if let Some(entry) = entry {
///             println!("Showing {}", entry.title_for_display());
///         }
///     }
/// }
/// ```
pub trait NavigationObserver: Send + Sync + 'static {
    /// A brand-new navigation was handed to the host.
    fn on_navigation_pending(&self, entry: &NavigationEntry);

    /// The host reported a load. `entry` is the last committed entry after
    /// reconciliation, which may be unchanged if the report was stale.
    fn on_navigation_committed(&self, entry: Option<&NavigationEntry>);

    /// Observer name for debugging.
    fn name(&self) -> &'static str {
        "NavigationObserver"
    }
}

// ============================================================================
// observer_fn helper
// ============================================================================

/// Create an observer from two closures (pending and committed).
///
/// # Example
///
/// ```
/// use session_navigator::observer_fn;
///
/// let observer = observer_fn(
///     |entry| println!("Pending: {}", entry.url()),
///     |entry| println!("Committed: {:?}", entry.map(|e| e.url().as_str())),
/// );
/// ```
pub const fn observer_fn<P, C>(pending: P, committed: C) -> FnObserver<P, C>
where
    P: Fn(&NavigationEntry) + Send + Sync + 'static,
    C: Fn(Option<&NavigationEntry>) + Send + Sync + 'static,
{
    FnObserver { pending, committed }
}

/// Observer created from two closures via [`observer_fn`].
pub struct FnObserver<P, C> {
    pending: P,
    committed: C,
}

impl<P, C> NavigationObserver for FnObserver<P, C>
where
    P: Fn(&NavigationEntry) + Send + Sync + 'static,
    C: Fn(Option<&NavigationEntry>) + Send + Sync + 'static,
{
    fn on_navigation_pending(&self, entry: &NavigationEntry) {
        (self.pending)(entry);
    }

    fn on_navigation_committed(&self, entry: Option<&NavigationEntry>) {
        (self.committed)(entry);
    }

    fn name(&self) -> &'static str {
        "FnObserver"
    }
}

// ============================================================================
// Tests
// ============================================================================
