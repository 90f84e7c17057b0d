//! Test fixtures for controller tests
//!
//! Provides a recording host and observer, entry builders, and helpers to
//! build a history with a given number of committed pages.

#![allow(dead_code)]

use session_navigator::*;
use std::sync::{Arc, Mutex};
use url::Url;

/// Everything a [`RecordingHost`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Navigate { url: String, reload: bool },
    EnsureContentState { page_id: i32 },
    StateChanged,
    Pruned,
    ActiveIndexChanged { previous: Option<usize> },
    PendingDiscarded,
}

/// Host that records every call and reports a settable max page ID.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub max_page_id: i32,
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            max_page_id: INVALID_PAGE_ID,
            events: Vec::new(),
        }
    }

    pub fn count(&self, event: &HostEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    pub fn navigations(&self) -> Vec<(String, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Navigate { url, reload } => Some((url.clone(), *reload)),
                _ => None,
            })
            .collect()
    }
}

impl NavigationHost for RecordingHost {
    fn max_page_id(&self) -> i32 {
        self.max_page_id
    }

    fn navigate_to_pending_entry(&mut self, entry: &NavigationEntry, reload: bool) {
        self.events.push(HostEvent::Navigate {
            url: entry.url().to_string(),
            reload,
        });
    }

    fn ensure_content_state(&mut self, entry: &mut NavigationEntry) {
        self.events.push(HostEvent::EnsureContentState {
            page_id: entry.page_id(),
        });
        entry.set_content_state(format!("state:{}", entry.page_id()).into_bytes());
    }

    fn navigation_state_changed(&mut self) {
        self.events.push(HostEvent::StateChanged);
    }

    fn pruned_entries(&mut self) {
        self.events.push(HostEvent::Pruned);
    }

    fn active_entry_index_changed(&mut self, previous: Option<usize>) {
        self.events.push(HostEvent::ActiveIndexChanged { previous });
    }

    fn pending_entry_discarded(&mut self) {
        self.events.push(HostEvent::PendingDiscarded);
    }
}

/// Observer notification, with the URL of the entry it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    Pending(String),
    Committed(Option<String>),
}

/// Observer that records notifications.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<ObserverEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn committed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::Committed(_)))
            .count()
    }
}

impl NavigationObserver for RecordingObserver {
    fn on_navigation_pending(&self, entry: &NavigationEntry) {
        self.events
            .lock()
            .unwrap()
            .push(ObserverEvent::Pending(entry.url().to_string()));
    }

    fn on_navigation_committed(&self, entry: Option<&NavigationEntry>) {
        self.events
            .lock()
            .unwrap()
            .push(ObserverEvent::Committed(entry.map(|e| e.url().to_string())));
    }

    fn name(&self) -> &'static str {
        "RecordingObserver"
    }
}

/// Enable `RUST_LOG`-controlled output for a test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn page_url(page_id: i32) -> Url {
    Url::parse(&format!("https://site.test/page/{page_id}")).unwrap()
}

/// A brand-new navigation to `url`, as a caller would create it.
pub fn new_entry(url: &str) -> NavigationEntry {
    NavigationEntry::new(ContentType::Web, Url::parse(url).unwrap())
}

/// What the renderer reports after loading page `page_id`.
pub fn loaded(page_id: i32) -> NavigationEntry {
    NavigationEntry::new(ContentType::Web, page_url(page_id))
        .with_page_id(page_id)
        .with_title(format!("Page {page_id}"))
}

/// Report a new page load the way a real tab would: commit, then bump the
/// host's max page ID.
pub fn commit_new(controller: &mut NavigationController<RecordingHost>, page_id: i32) -> CommitOutcome {
    let outcome = controller.did_navigate_to_entry(loaded(page_id));
    let host = controller.host_mut();
    host.max_page_id = host.max_page_id.max(page_id);
    outcome
}

/// A controller with pages `0..count` committed.
pub fn controller_with_pages(count: i32) -> NavigationController<RecordingHost> {
    controller_with_config(count, ControllerConfig::default())
}

pub fn controller_with_config(
    count: i32,
    config: ControllerConfig,
) -> NavigationController<RecordingHost> {
    init_logging();
    let mut controller = NavigationController::with_config(RecordingHost::new(), config);
    for page_id in 0..count {
        commit_new(&mut controller, page_id);
    }
    controller.host_mut().events.clear();
    controller
}

/// Attach a fresh recording observer.
pub fn observe(controller: &mut NavigationController<RecordingHost>) -> Arc<RecordingObserver> {
    let observer = Arc::new(RecordingObserver::default());
    controller.add_observer(Arc::clone(&observer) as Arc<dyn NavigationObserver>);
    observer
}

pub fn page_ids(controller: &NavigationController<RecordingHost>) -> Vec<i32> {
    controller.entries().iter().map(NavigationEntry::page_id).collect()
}
