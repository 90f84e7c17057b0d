//! Controller configuration.
//!
//! ```
//! use session_navigator::ControllerConfig;
//!
//! let config = ControllerConfig::new().with_max_entry_count(10);
//! assert_eq!(config.max_entry_count(), 10);
//! assert_eq!(ControllerConfig::default().max_entry_count(), 50);
//! ```

use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for a [`NavigationController`](crate::NavigationController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    max_entry_count: NonZeroUsize,
}

impl ControllerConfig {
    /// Number of entries kept per tab unless configured otherwise.
    pub const DEFAULT_MAX_ENTRY_COUNT: usize = 50;

    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            max_entry_count: NonZeroUsize::new(Self::DEFAULT_MAX_ENTRY_COUNT)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Cap the history length. Inserting past the cap evicts the oldest
    /// entry.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn with_max_entry_count(mut self, count: usize) -> Self {
        self.max_entry_count = NonZeroUsize::new(count).expect("Max entry count must be non-zero");
        self
    }

    /// Maximum number of entries the history holds.
    pub fn max_entry_count(&self) -> usize {
        self.max_entry_count.get()
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}
