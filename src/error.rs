//! Errors and commit outcomes.
//!
//! - [`NavigationError`]: a caller asked for something the history cannot
//!   do (going back from the first entry, an index past the end, removing the
//!   entry being shown). These are programmer errors: the panicking
//!   controller methods abort with this message, the `try_` variants hand it
//!   back.
//! - [`CommitOutcome`]: what
//!   [`did_navigate_to_entry`](crate::NavigationController::did_navigate_to_entry)
//!   did with a load reported by the host.
//!
//! # Examples
//!
//! ```
//! use session_navigator::{CommitOutcome, NavigationError};
//!
//! let outcome = CommitOutcome::NewEntry { index: 3 };
//! assert!(outcome.is_new_entry());
//! assert_eq!(outcome.committed_index(), Some(3));
//!
//! let err = NavigationError::IndexOutOfRange { index: 7, len: 2 };
//! assert_eq!(err.to_string(), "history index 7 out of range (2 entries)");
//! ```

// ============================================================================
// NavigationError
// ============================================================================

/// Precondition violations on the session history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("cannot go back: already at the oldest entry")]
    CannotGoBack,

    #[error("cannot go forward: already at the newest entry")]
    CannotGoForward,

    #[error("history index {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("auto-subframe navigations cannot create history entries")]
    SubframeEntry,

    #[error("history index {index} is pending or last committed and cannot be removed")]
    ProtectedIndex { index: usize },

    #[error("cannot restore into a history that already has {len} entries")]
    NotEmpty { len: usize },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NavigationError>;

// ============================================================================
// CommitOutcome
// ============================================================================

/// How a load reported by the host was reconciled with the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The page ID was beyond anything seen before: a new entry was appended.
    NewEntry { index: usize },

    /// A freshly loaded URL turned out to be the page already at `index`.
    /// The existing entry took over the pending entry's unique ID.
    SamePage { index: usize },

    /// An existing entry was revisited (back/forward, reload, or a
    /// renderer-initiated navigation) and refreshed in place.
    ExistingEntry {
        index: usize,
        previous: Option<usize>,
    },

    /// Nothing in the history matched; the report was stale and dropped.
    Ignored { page_id: i32 },
}

impl CommitOutcome {
    /// Check if a new entry was appended
    pub fn is_new_entry(&self) -> bool {
        matches!(self, Self::NewEntry { .. })
    }

    /// Check if the report was dropped
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }

    /// Index of the entry the report landed on, if any.
    pub fn committed_index(&self) -> Option<usize> {
        match self {
            Self::NewEntry { index }
            | Self::SamePage { index }
            | Self::ExistingEntry { index, .. } => Some(*index),
            Self::Ignored { .. } => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
