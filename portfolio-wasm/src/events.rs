use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, MouseEvent, TouchEvent};

use portfolio_core::{DragEvent, Position, default_layout, position_for};

use crate::sections::{
    apply_dragging, apply_fixed, apply_position, apply_z, set_save_visible,
};
use crate::state::State;
use crate::storage;
use crate::utils::{log, now_ms, viewport_boundary};

/// Drain every controller's queued notifications and mirror them into the
/// DOM and the layout map. Runs after each event handler and each frame,
/// never inside a controller update.
pub fn flush(s: &mut State) {
    for i in 0..s.sections.len() {
        let events = s.sections[i].controller.drain_events();
        if events.is_empty() {
            continue;
        }
        let id = s.sections[i].id;
        let host = s.sections[i].host.clone();
        for ev in events {
            match ev {
                DragEvent::DragStarted => {
                    s.next_z += 1;
                    apply_z(&host, s.next_z);
                    apply_dragging(&host, true);
                }
                DragEvent::PositionChanged(pos) => {
                    apply_position(&host, &pos);
                    s.layout.insert(id.to_string(), pos);
                    s.dirty = true;
                }
                DragEvent::FixedChanged(fixed) => {
                    apply_fixed(&host, fixed);
                    if fixed {
                        apply_dragging(&host, false);
                    }
                }
                DragEvent::SettleEnded => {}
            }
        }
    }
    set_save_visible(&s.save_btn, s.dirty);
}

/// Wire up pointer, touch, resize and button handlers.
pub fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    // Per-card mouse down
    for i in 0..state.borrow().sections.len() {
        let host = state.borrow().sections[i].host.clone();
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            let mut s = st.borrow_mut();
            let now = now_ms(&s.window);
            let p = Position {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            };
            s.sections[i].controller.pointer_down(p, now);
            flush(&mut s);
        }));
        host.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();

        // First touch point substitutes for the mouse; events with no
        // active touch are a no-op.
        let host2 = state.borrow().sections[i].host.clone();
        let st = state.clone();
        let touchstart = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            e.prevent_default();
            let mut s = st.borrow_mut();
            let now = now_ms(&s.window);
            let p = Position {
                x: touch.client_x() as f64,
                y: touch.client_y() as f64,
            };
            s.sections[i].controller.pointer_down(p, now);
            flush(&mut s);
        }));
        host2.add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
        touchstart.forget();
    }

    // Window-level move/up so a fast drag cannot escape the card.
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let p = Position {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            };
            for i in 0..s.sections.len() {
                s.sections[i].controller.pointer_move(p);
            }
            flush(&mut s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            let mut s = st.borrow_mut();
            release_all(&mut s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }
    {
        let st = state.clone();
        let touchmove = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |e: TouchEvent| {
            let mut s = st.borrow_mut();
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            if s.sections.iter().any(|sec| sec.controller.is_dragging()) {
                e.prevent_default();
            }
            let p = Position {
                x: touch.client_x() as f64,
                y: touch.client_y() as f64,
            };
            for i in 0..s.sections.len() {
                s.sections[i].controller.pointer_move(p);
            }
            flush(&mut s);
        }));
        // Non-passive so the page does not scroll under an active drag.
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        state
            .borrow()
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                touchmove.as_ref().unchecked_ref(),
                &opts,
            )?;
        touchmove.forget();
    }
    {
        let st = state.clone();
        let touchend = Closure::<dyn FnMut(TouchEvent)>::wrap(Box::new(move |_e: TouchEvent| {
            let mut s = st.borrow_mut();
            release_all(&mut s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref())?;
        touchend.forget();
    }

    // Boundary follows the viewport.
    {
        let st = state.clone();
        let resize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            let bounds = viewport_boundary(&s.window);
            for i in 0..s.sections.len() {
                s.sections[i].controller.set_bounds(bounds);
            }
            flush(&mut s);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        resize.forget();
    }

    // Save current layout
    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            storage::save_layout(&s.window, &s.layout_slot, &s.layout);
            s.dirty = false;
            set_save_visible(&s.save_btn, false);
            log("layout saved");
        }));
        state
            .borrow()
            .save_btn
            .set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    Ok(())
}

/// Wire the reset button: restore defaults, clear storage, unpin all.
pub fn attach_reset(
    state: Rc<RefCell<State>>,
    reset_btn: &web_sys::HtmlElement,
) -> Result<(), JsValue> {
    let st = state.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let mut s = st.borrow_mut();
        let defaults = default_layout();
        for i in 0..s.sections.len() {
            let id = s.sections[i].id;
            let pos = position_for(&defaults, id);
            let host = s.sections[i].host.clone();
            s.sections[i].controller.seed_position(pos);
            s.sections[i].controller.reset();
            apply_position(&host, &pos);
            apply_dragging(&host, false);
        }
        s.layout = defaults;
        storage::clear_layout(&s.window, &s.layout_slot);
        s.dirty = false;
        flush(&mut s);
        set_save_visible(&s.save_btn, false);
    }));
    reset_btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}

fn release_all(s: &mut State) {
    let now = now_ms(&s.window);
    for i in 0..s.sections.len() {
        if s.sections[i].controller.is_dragging() {
            let host = s.sections[i].host.clone();
            apply_dragging(&host, false);
        }
        s.sections[i].controller.pointer_up(now);
    }
    flush(s);
}

/// Drive every controller from `requestAnimationFrame`; the timestamp the
/// browser passes in shares an origin with `performance.now()`.
pub fn start_animation(state: Rc<RefCell<State>>) {
    type RafClosure = Closure<dyn FnMut(f64)>;
    let f: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        {
            let mut s = state.borrow_mut();
            for i in 0..s.sections.len() {
                s.sections[i].controller.on_frame(ts);
            }
            flush(&mut s);
        }
        let _ = web_sys::window()
            .unwrap()
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }) as Box<dyn FnMut(f64)>));
    let _ = web_sys::window()
        .unwrap()
        .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
}
