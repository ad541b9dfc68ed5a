use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use portfolio_core::Position;

use crate::constants::BASE_Z_INDEX;

/// Section ids with their card headings. The card content itself is
/// placeholder copy; positions are the interesting part of this app.
pub const SECTION_TITLES: [(&str, &str); 4] = [
    ("about", "About Me"),
    ("projects", "Projects"),
    ("techstack", "Tech Stack"),
    ("experience", "Experience"),
];

fn section_body(id: &str) -> &'static str {
    match id {
        "about" => "Web developer. Drag this card anywhere; hold it for a second to pin it.",
        "projects" => "Selected work. Released cards fall and bounce until they settle.",
        "techstack" => "Rust, WebAssembly, TypeScript, and friends.",
        _ => "Where I have worked and what I shipped there.",
    }
}

/// Create (or reuse) the full-viewport container the cards live in.
pub fn build_root(document: &Document) -> Result<HtmlElement, JsValue> {
    if let Some(el) = document.get_element_by_id("portfolio")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        return Ok(el);
    }
    let root = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    root.set_id("portfolio");
    let style = root.style();
    style.set_property("position", "relative")?;
    style.set_property("min-height", "100vh")?;
    style.set_property("overflow", "hidden")?;
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?
        .append_child(&root)?;
    Ok(root)
}

/// Build one absolutely positioned card host under `root`.
pub fn build_card(document: &Document, root: &HtmlElement, id: &str) -> Result<HtmlElement, JsValue> {
    let title = SECTION_TITLES
        .iter()
        .find(|(sid, _)| *sid == id)
        .map(|(_, t)| *t)
        .unwrap_or(id);
    let card = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    card.set_id(&format!("section-{id}"));
    card.set_inner_html(&format!(
        "<h2>{title}</h2><p>{}</p>",
        section_body(id)
    ));
    let style = card.style();
    style.set_property("position", "absolute")?;
    style.set_property("width", "320px")?;
    style.set_property("padding", "16px")?;
    style.set_property("border-radius", "12px")?;
    style.set_property("background", "#fff")?;
    style.set_property("box-shadow", "0 4px 16px rgba(0,0,0,.12)")?;
    style.set_property("cursor", "grab")?;
    style.set_property("user-select", "none")?;
    style.set_property("touch-action", "none")?;
    style.set_property("z-index", &BASE_Z_INDEX.to_string())?;
    root.append_child(&card)?;
    Ok(card)
}

/// Build the save/reset buttons in a fixed top-right toolbar. The save
/// button starts hidden and only appears once positions change.
pub fn build_controls(document: &Document) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let bar = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    let style = bar.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "16px")?;
    style.set_property("right", "16px")?;
    style.set_property("z-index", "10000")?;
    style.set_property("display", "flex")?;
    style.set_property("gap", "8px")?;

    let save = document.create_element("button")?.dyn_into::<HtmlElement>()?;
    save.set_id("saveLayout");
    save.set_inner_text("Save layout");
    save.style().set_property("display", "none")?;

    let reset = document.create_element("button")?.dyn_into::<HtmlElement>()?;
    reset.set_id("resetLayout");
    reset.set_inner_text("Reset layout");

    bar.append_child(&save)?;
    bar.append_child(&reset)?;
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?
        .append_child(&bar)?;
    Ok((save, reset))
}

/// Move a card to `pos` via inline styles.
pub fn apply_position(host: &HtmlElement, pos: &Position) {
    let style = host.style();
    let _ = style.set_property("left", &format!("{}px", pos.x));
    let _ = style.set_property("top", &format!("{}px", pos.y));
}

/// Grab/grabbing affordance plus a slight scale-up while dragging.
pub fn apply_dragging(host: &HtmlElement, dragging: bool) {
    let style = host.style();
    if dragging {
        let _ = style.set_property("cursor", "grabbing");
        let _ = style.set_property("transform", "scale(1.05)");
    } else {
        let _ = style.set_property("cursor", "grab");
        let _ = style.set_property("transform", "none");
    }
}

/// Pinned cards get a visible ring and lose the grab affordance.
pub fn apply_fixed(host: &HtmlElement, fixed: bool) {
    let style = host.style();
    if fixed {
        let _ = style.set_property("outline", "2px solid #38bdf8");
        let _ = style.set_property("cursor", "default");
    } else {
        let _ = style.set_property("outline", "none");
        let _ = style.set_property("cursor", "grab");
    }
}

pub fn apply_z(host: &HtmlElement, z: i32) {
    let _ = host.style().set_property("z-index", &z.to_string());
}

/// Show or hide the save button.
pub fn set_save_visible(save_btn: &HtmlElement, visible: bool) {
    let _ = save_btn
        .style()
        .set_property("display", if visible { "inline-block" } else { "none" });
}
