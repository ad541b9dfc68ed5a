use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, HtmlElement, Window};

use portfolio_core::{DragController, SectionLayout};

/// One draggable card on the page: its DOM host plus the controller that
/// owns its position for the whole page lifetime.
pub struct Section {
    pub id: &'static str,
    pub host: HtmlElement,
    pub controller: DragController,
}

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub sections: Vec<Section>,
    /// Current id → position map, mirrored into storage on save.
    pub layout: SectionLayout,
    /// Storage slot name chosen via the `?layout=` query parameter.
    pub layout_slot: String,
    /// Unsaved position changes exist; controls the save button.
    pub dirty: bool,
    /// Monotonic stacking order; bumped when a drag starts.
    pub next_z: i32,
    pub save_btn: HtmlElement,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
