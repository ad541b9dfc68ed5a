use std::collections::BTreeMap;

use crate::position::Position;

/// Identifiers of the portfolio sections, in render order.
pub const SECTION_IDS: [&str; 4] = ["about", "projects", "techstack", "experience"];

/// Mapping of section id to its current position. This is exactly the
/// payload the host persists; a `BTreeMap` keeps it stable when serialized.
pub type SectionLayout = BTreeMap<String, Position>;

/// Arrangement used before any saved layout exists.
pub fn default_layout() -> SectionLayout {
    let mut layout = SectionLayout::new();
    layout.insert("about".to_string(), Position { x: 20.0, y: 20.0 });
    layout.insert("projects".to_string(), Position { x: 20.0, y: 300.0 });
    layout.insert("techstack".to_string(), Position { x: 20.0, y: 580.0 });
    layout.insert("experience".to_string(), Position { x: 20.0, y: 860.0 });
    layout
}

/// Position for `id`, falling back to the default arrangement and then to
/// the origin for ids a stored layout never saw.
pub fn position_for(layout: &SectionLayout, id: &str) -> Position {
    if let Some(p) = layout.get(id) {
        return *p;
    }
    default_layout().get(id).copied().unwrap_or_default()
}
