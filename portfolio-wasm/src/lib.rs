use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use portfolio_core::{DragConfig, DragController, default_layout, position_for};

mod constants;
mod events;
mod sections;
mod state;
mod storage;
mod utils;

use state::{STATE, Section, State};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // Optional named layout slot: ?layout=<name> keeps arrangements apart.
    let slot = window
        .location()
        .search()
        .ok()
        .and_then(|s| utils::get_query_param(&s, "layout"))
        .unwrap_or_default();

    // Saved positions override the defaults per section; sections a stored
    // layout never saw keep their default spot.
    let mut layout = default_layout();
    if let Some(saved) = storage::load_layout(&window, &slot) {
        for (id, pos) in saved {
            layout.insert(id, pos);
        }
    }

    let bounds = utils::viewport_boundary(&window);
    let root = sections::build_root(&document)?;
    let mut cards = Vec::new();
    for (id, _title) in sections::SECTION_TITLES {
        let host = sections::build_card(&document, &root, id)?;
        let controller =
            DragController::new(position_for(&layout, id), bounds, DragConfig::default());
        sections::apply_position(&host, &controller.position());
        cards.push(Section {
            id,
            host,
            controller,
        });
    }
    let (save_btn, reset_btn) = sections::build_controls(&document)?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        sections: cards,
        layout,
        layout_slot: slot,
        dirty: false,
        next_z: constants::BASE_Z_INDEX,
        save_btn,
    }));

    STATE.with(|st| st.replace(Some(state.clone())));
    events::attach_ui(state.clone())?;
    events::attach_reset(state.clone(), &reset_btn)?;
    events::start_animation(state.clone());
    Ok(())
}
