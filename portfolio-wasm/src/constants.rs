/// Application-wide numeric constants. Values are CSS pixels unless noted.
/// Width reserved for a section card when computing the drag boundary,
/// so the right edge stays reachable.
pub const SECTION_WIDTH: f64 = 320.0;
/// Height reserved for a section card when computing the drag boundary.
pub const SECTION_HEIGHT: f64 = 200.0;
/// Stacking order assigned to cards before any drag happened.
pub const BASE_Z_INDEX: i32 = 1;
/// localStorage key (optionally suffixed with a layout slot name).
pub const STORAGE_KEY: &str = "sectionPositions";
