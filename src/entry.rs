//! Session history entries.
//!
//! A [`NavigationEntry`] describes one visited location: where it was, how
//! the user got there, what it looked like, and the opaque page state the
//! renderer needs to restore it. Entries are plain values; the
//! [`NavigationController`](crate::NavigationController) owns them once they
//! are loaded or committed.
//!
//! # Examples
//!
//! ```
//! use session_navigator::{ContentType, NavigationEntry, PageTransition};
//! use url::Url;
//!
//! let entry = NavigationEntry::new(ContentType::Web, Url::parse("https://example.com/").unwrap())
//!     .with_title("Example")
//!     .with_transition_type(PageTransition::Typed);
//!
//! assert!(entry.is_new());
//! assert_eq!(entry.title_for_display(), "Example");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use url::Url;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page ID of an entry the renderer has not assigned an ID to yet.
pub const INVALID_PAGE_ID: i32 = -1;

/// Process-wide source of unique IDs. Starts at 1 so that 0 never names a
/// real navigation.
static NEXT_UNIQUE_ID: AtomicI32 = AtomicI32::new(1);

fn next_unique_id() -> i32 {
    NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed)
}

// ============================================================================
// Discriminators
// ============================================================================

/// Which kind of content host renders an entry.
///
/// Page IDs are only unique within one content host, so history lookups
/// always match on the content type too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContentType {
    /// Regular web content.
    #[default]
    Web,
    /// Browser-native UI pages (downloads, history).
    NativeUi,
    /// The new tab page.
    NewTabUi,
    /// Web-rendered browser UI.
    DomUi,
    /// `about:` pages.
    About,
}

/// Opaque process/isolation key of the site instance an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteInstanceId(pub u64);

/// How the user arrived at an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PageTransition {
    /// Followed a link.
    #[default]
    Link,
    /// Typed the URL into the location bar.
    Typed,
    /// Picked a bookmark or other browser-suggested destination.
    AutoBookmark,
    /// Subframe navigation the user did not request (ads, embedded widgets).
    /// These never become top-level history entries.
    AutoSubframe,
    /// Subframe navigation the user explicitly requested.
    ManualSubframe,
    /// Picked a generated suggestion, e.g. a search query.
    Generated,
    /// Start page opened on launch.
    StartPage,
    /// Submitted a form.
    FormSubmit,
    /// Reloaded the page.
    Reload,
    /// Keyword search from the location bar.
    Keyword,
}

impl PageTransition {
    /// Whether this transition navigates a subframe rather than the tab.
    pub fn is_subframe(self) -> bool {
        matches!(self, Self::AutoSubframe | Self::ManualSubframe)
    }
}

/// Security state shown for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SecurityStyle {
    /// Not determined yet.
    #[default]
    Unknown,
    /// Plain, unencrypted connection.
    Unauthenticated,
    /// Encrypted, but something about the connection is wrong.
    AuthenticationBroken,
    /// Valid secure connection.
    Authenticated,
}

/// SSL state of a committed page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SslStatus {
    /// Overall style the UI should render.
    pub security_style: SecurityStyle,
    /// Handle of the server certificate in the host's certificate store.
    pub cert_id: i32,
    /// Strength of the negotiated cipher, -1 when unknown.
    pub security_bits: i32,
    /// The page loaded some subresources over plain HTTP.
    pub has_mixed_content: bool,
    /// The page loaded subresources with certificate errors.
    pub has_unsafe_content: bool,
}

/// Fav icon of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FavIcon {
    /// Where the icon was (or will be) fetched from.
    pub url: Option<Url>,
    /// Encoded image bytes, if already downloaded.
    pub image: Option<Vec<u8>>,
    /// Whether `image` is the icon for this page rather than a placeholder.
    pub valid: bool,
}

// ============================================================================
// NavigationEntry
// ============================================================================

/// One visited location in a tab's session history.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationEntry {
    content_type: ContentType,
    site_instance: Option<SiteInstanceId>,
    page_id: i32,
    unique_id: i32,
    url: Url,
    title: String,
    fav_icon: FavIcon,
    content_state: Vec<u8>,
    transition_type: PageTransition,
    restored: bool,
    ssl: SslStatus,
    /// Host object derived from `content_state`, dropped whenever the state
    /// changes.
    #[cfg_attr(feature = "serde", serde(skip))]
    history_item: Option<Arc<dyn Any + Send + Sync>>,
}

impl NavigationEntry {
    /// Create an entry for a navigation the renderer has not seen yet.
    ///
    /// The entry gets a fresh unique ID, an unassigned page ID and a
    /// [`PageTransition::Link`] transition.
    pub fn new(content_type: ContentType, url: Url) -> Self {
        Self {
            content_type,
            site_instance: None,
            page_id: INVALID_PAGE_ID,
            unique_id: next_unique_id(),
            url,
            title: String::new(),
            fav_icon: FavIcon::default(),
            content_state: Vec::new(),
            transition_type: PageTransition::Link,
            restored: false,
            ssl: SslStatus::default(),
            history_item: None,
        }
    }

    /// Set the page ID.
    pub fn with_page_id(mut self, page_id: i32) -> Self {
        self.page_id = page_id;
        self
    }

    /// Set the site instance.
    pub fn with_site_instance(mut self, site_instance: SiteInstanceId) -> Self {
        self.site_instance = Some(site_instance);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the transition type.
    pub fn with_transition_type(mut self, transition_type: PageTransition) -> Self {
        self.transition_type = transition_type;
        self
    }

    /// Set the serialized page state.
    pub fn with_content_state(mut self, content_state: impl Into<Vec<u8>>) -> Self {
        self.set_content_state(content_state);
        self
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.content_type = content_type;
    }

    pub fn site_instance(&self) -> Option<SiteInstanceId> {
        self.site_instance
    }

    pub fn set_site_instance(&mut self, site_instance: Option<SiteInstanceId>) {
        self.site_instance = site_instance;
    }

    /// Renderer-assigned page ID, [`INVALID_PAGE_ID`] until the first commit.
    pub fn page_id(&self) -> i32 {
        self.page_id
    }

    pub fn set_page_id(&mut self, page_id: i32) {
        self.page_id = page_id;
    }

    /// Whether the renderer has not assigned a page ID yet.
    pub fn is_new(&self) -> bool {
        self.page_id == INVALID_PAGE_ID
    }

    /// ID shared by every in-place update of the same logical navigation.
    pub fn unique_id(&self) -> i32 {
        self.unique_id
    }

    pub fn set_unique_id(&mut self, unique_id: i32) {
        self.unique_id = unique_id;
    }

    /// Whether `other` refers to the same history slot: same content host,
    /// same site instance, same page ID.
    pub fn matches_page(
        &self,
        content_type: ContentType,
        site_instance: Option<SiteInstanceId>,
        page_id: i32,
    ) -> bool {
        self.content_type == content_type
            && self.site_instance == site_instance
            && self.page_id == page_id
    }

    // ------------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------------

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn set_url(&mut self, url: Url) {
        self.url = url;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Title to show in tabs and history menus. Falls back to the URL for
    /// untitled pages.
    pub fn title_for_display(&self) -> &str {
        if self.title.is_empty() {
            self.url.as_str()
        } else {
            &self.title
        }
    }

    pub fn fav_icon(&self) -> &FavIcon {
        &self.fav_icon
    }

    pub fn fav_icon_mut(&mut self) -> &mut FavIcon {
        &mut self.fav_icon
    }

    pub fn set_fav_icon(&mut self, fav_icon: FavIcon) {
        self.fav_icon = fav_icon;
    }

    pub fn ssl(&self) -> &SslStatus {
        &self.ssl
    }

    pub fn ssl_mut(&mut self) -> &mut SslStatus {
        &mut self.ssl
    }

    pub fn transition_type(&self) -> PageTransition {
        self.transition_type
    }

    pub fn set_transition_type(&mut self, transition_type: PageTransition) {
        self.transition_type = transition_type;
    }

    /// Whether this entry came from a restored session and has not been
    /// loaded since.
    pub fn restored(&self) -> bool {
        self.restored
    }

    pub fn set_restored(&mut self, restored: bool) {
        self.restored = restored;
    }

    // ------------------------------------------------------------------------
    // Page state
    // ------------------------------------------------------------------------

    /// Opaque serialized form and scroll state, owned by the renderer.
    pub fn content_state(&self) -> &[u8] {
        &self.content_state
    }

    /// Replace the serialized page state.
    ///
    /// Drops any cached history item, since it was derived from the old state.
    pub fn set_content_state(&mut self, content_state: impl Into<Vec<u8>>) {
        self.content_state = content_state.into();
        self.history_item = None;
    }

    /// Return the cached history item if one is set and it is a `T`.
    pub fn cached_history_item<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.history_item
            .as_ref()
            .and_then(|item| Arc::clone(item).downcast::<T>().ok())
    }

    /// Cache a host object derived from the current content state.
    pub fn set_cached_history_item<T: Any + Send + Sync>(&mut self, item: Arc<T>) {
        self.history_item = Some(item as Arc<dyn Any + Send + Sync>);
    }

    /// Copy the fields a committed navigation may change in place (client
    /// redirects, title and icon updates) from `other`.
    ///
    /// Identity fields and the unique ID are left alone.
    pub(crate) fn update_display_from(&mut self, other: &NavigationEntry) {
        self.url = other.url.clone();
        self.title.clone_from(&other.title);
        self.fav_icon.clone_from(&other.fav_icon);
        self.set_content_state(other.content_state.clone());
        self.ssl.clone_from(&other.ssl);
    }
}

impl fmt::Debug for NavigationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEntry")
            .field("content_type", &self.content_type)
            .field("site_instance", &self.site_instance)
            .field("page_id", &self.page_id)
            .field("unique_id", &self.unique_id)
            .field("url", &self.url.as_str())
            .field("title", &self.title)
            .field("transition_type", &self.transition_type)
            .field("restored", &self.restored)
            .field("content_state_len", &self.content_state.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
