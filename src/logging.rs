//! Logging shims.
//!
//! The controller never talks to a logging crate directly. Every call site
//! goes through one of the macros below, which forward to either
//! [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing)
//! depending on the enabled feature. Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing.
//!
//! ```ignore
//! use session_navigator::{debug_log, warn_log};
//!
//! debug_log!("Issuing navigation to entry {} (reload: {})", index, reload);
//! warn_log!("Ignoring commit for unknown page {}", page_id);
//! ```
//!
//! Levels used by the crate:
//!
//! - `trace_log!`: list bookkeeping (prune, evict, remove).
//! - `debug_log!`: navigations handed to the host, pending discards.
//! - `info_log!`: commits.
//! - `warn_log!`: stale or unmatched commits from the host.
//! - `error_log!`: currently unused by the crate itself; exported for hosts.

/// Forward a message at `$level` to whichever backend is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __session_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    }};
}

/// Emit a **trace**-level message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__session_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__session_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__session_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__session_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__session_log!(error, $($arg)*)
    };
}
