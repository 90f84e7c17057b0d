//! Session persistence round trip (requires the `serde` feature).

#![cfg(feature = "serde")]

mod common;

use common::*;
use session_navigator::*;
use std::sync::Arc;

#[test]
fn test_saved_session_restores_into_new_controller() {
    let mut controller = controller_with_pages(3);
    controller.go_back();
    controller.did_navigate_to_entry(loaded(1).with_content_state(b"scroll=42".to_vec()));

    let saved = serde_json::to_string(controller.entries()).unwrap();
    let selected = controller.last_committed_entry_index().unwrap();

    let entries: Vec<NavigationEntry> = serde_json::from_str(&saved).unwrap();
    let mut restored = controller_with_pages(0);
    restored.restore(entries, selected).unwrap();

    assert_eq!(page_ids(&restored), vec![0, 1, 2]);
    assert_eq!(restored.last_committed_entry_index(), Some(1));
    let entry = restored.last_committed_entry().unwrap();
    assert_eq!(entry.content_state(), b"scroll=42");
    assert_eq!(entry.title(), "Page 1");
    assert!(entry.restored());
}

#[test]
fn test_cached_history_item_is_not_persisted() {
    let mut entry = loaded(0);
    entry.set_cached_history_item(Arc::new(String::from("decoded")));

    let json = serde_json::to_string(&entry).unwrap();
    let back: NavigationEntry = serde_json::from_str(&json).unwrap();

    assert!(back.cached_history_item::<String>().is_none());
    assert_eq!(back.unique_id(), entry.unique_id());
}

#[test]
fn test_config_serializes() {
    let config = ControllerConfig::new().with_max_entry_count(12);
    let json = serde_json::to_string(&config).unwrap();
    let back: ControllerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    assert!(serde_json::from_str::<ControllerConfig>(r#"{"max_entry_count":0}"#).is_err());
}
