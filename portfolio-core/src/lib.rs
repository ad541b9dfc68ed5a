//! Drag interaction logic for the portfolio's movable section cards.
//!
//! Everything in this crate is platform independent. The browser host feeds
//! pointer events and frame timestamps in, and drains [`DragEvent`]s back
//! out after each update; nothing here touches the DOM or wall-clock time.

pub mod controller;
pub mod gravity;
pub mod hold;
pub mod layout;
pub mod position;

pub use controller::{DragConfig, DragController, DragEvent};
pub use gravity::GravitySim;
pub use hold::HoldTimer;
pub use layout::{SECTION_IDS, SectionLayout, default_layout, position_for};
pub use position::{Boundary, Position, clamp};
