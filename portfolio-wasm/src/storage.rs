use web_sys::Window;

use portfolio_core::SectionLayout;

use crate::constants::STORAGE_KEY;
use crate::utils::log;

fn storage_key(slot: &str) -> String {
    if slot.is_empty() {
        STORAGE_KEY.to_string()
    } else {
        format!("{STORAGE_KEY}:{slot}")
    }
}

/// Load the saved layout for `slot`, if any. An unavailable store or a
/// malformed payload falls back to `None` rather than failing.
pub fn load_layout(window: &Window, slot: &str) -> Option<SectionLayout> {
    let storage = window.local_storage().ok()??;
    let text = storage.get_item(&storage_key(slot)).ok()??;
    match serde_json::from_str(&text) {
        Ok(layout) => Some(layout),
        Err(err) => {
            log(&format!("ignoring saved layout: {err}"));
            None
        }
    }
}

/// Persist the current layout. Storage errors (quota, private mode) are
/// logged and otherwise ignored; the in-memory layout stays authoritative.
pub fn save_layout(window: &Window, slot: &str, layout: &SectionLayout) {
    let Ok(Some(storage)) = window.local_storage() else {
        log("localStorage unavailable; layout not saved");
        return;
    };
    match serde_json::to_string(layout) {
        Ok(text) => {
            if storage.set_item(&storage_key(slot), &text).is_err() {
                log("failed to write layout to localStorage");
            }
        }
        Err(err) => log(&format!("failed to encode layout: {err}")),
    }
}

/// Remove the saved layout for `slot`. Missing keys are fine.
pub fn clear_layout(window: &Window, slot: &str) {
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.remove_item(&storage_key(slot));
    }
}
