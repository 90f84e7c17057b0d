//! # session-navigator
//!
//! Per-tab session history for a browser: the back/forward list, the
//! navigation currently in flight, and the reconciliation of asynchronous
//! page loads against that list.
//!
//! - [`NavigationEntry`]: one visited location.
//! - [`NavigationController`]: owns the entries and the pending navigation,
//!   runs back/forward/reload/load, and commits loads reported by the host.
//! - [`NavigationHost`]: implemented by the tab: starts loads and knows the
//!   renderer's highest page ID.
//! - [`NavigationObserver`]: optional listeners for pending and committed
//!   navigations.
//!
//! The controller is single-threaded and synchronous. "Pending" is just
//! state; the actual load happens in the host, which reports back through
//! [`NavigationController::did_navigate_to_entry`].
//!
//! # Features
//!
//! | Feature   | Description                                         | Default |
//! |-----------|-----------------------------------------------------|---------|
//! | `log`     | Diagnostics through the `log` crate                 | yes     |
//! | `tracing` | Diagnostics through the `tracing` crate             | no      |
//! | `serde`   | Serialize entries and config for session persistence | no      |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod host;
pub mod logging;
pub mod state;

pub use config::ControllerConfig;
pub use controller::NavigationController;
pub use entry::{
    ContentType, FavIcon, NavigationEntry, PageTransition, SecurityStyle, SiteInstanceId,
    SslStatus, INVALID_PAGE_ID,
};
pub use error::{CommitOutcome, NavigationError, Result};
pub use host::{observer_fn, FnObserver, NavigationHost, NavigationObserver};
pub use state::{HistoryState, Pending};
