use wasm_bindgen::JsValue;
use web_sys::Window;

use portfolio_core::Boundary;

use crate::constants::{SECTION_HEIGHT, SECTION_WIDTH};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Millisecond timestamp on the same origin as `requestAnimationFrame`.
pub fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Legal drag rectangle for the current viewport; recomputed on resize and
/// pushed into every controller.
pub fn viewport_boundary(window: &Window) -> Boundary {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1000.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1000.0);
    Boundary::for_viewport(w, h, SECTION_WIDTH, SECTION_HEIGHT)
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}
