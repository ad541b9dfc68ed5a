use serde::{Deserialize, Serialize};

/// Pixel offset from the layout container's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Position {
    fn from(v: (f64, f64)) -> Self {
        Position { x: v.0, y: v.1 }
    }
}

/// Axis-aligned rectangle a position may occupy. A missing field means that
/// side of the axis is unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Boundary {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

impl Boundary {
    /// Legal rectangle for a card of `card_w` x `card_h` pixels inside a
    /// viewport of `view_w` x `view_h`, anchored at the origin.
    pub fn for_viewport(view_w: f64, view_h: f64, card_w: f64, card_h: f64) -> Self {
        Boundary {
            min_x: Some(0.0),
            min_y: Some(0.0),
            max_x: Some((view_w - card_w).max(0.0)),
            max_y: Some((view_h - card_h).max(0.0)),
        }
    }
}

/// Constrain `pos` into `bounds`, each axis independently. With no bounds
/// defined this is the identity; it is idempotent either way.
pub fn clamp(pos: Position, bounds: &Boundary) -> Position {
    let mut x = pos.x;
    let mut y = pos.y;
    if let Some(min) = bounds.min_x {
        x = x.max(min);
    }
    if let Some(max) = bounds.max_x {
        x = x.min(max);
    }
    if let Some(min) = bounds.min_y {
        y = y.max(min);
    }
    if let Some(max) = bounds.max_y {
        y = y.min(max);
    }
    Position { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_into_rectangle() {
        let bounds = Boundary {
            min_x: Some(0.0),
            max_y: Some(400.0),
            ..Boundary::default()
        };
        let out = clamp(Position { x: -5.0, y: 500.0 }, &bounds);
        assert_eq!(out, Position { x: 0.0, y: 400.0 });
    }

    #[test]
    fn clamp_without_bounds_is_identity() {
        let p = Position { x: -42.5, y: 9000.0 };
        assert_eq!(clamp(p, &Boundary::default()), p);
    }

    #[test]
    fn clamp_is_idempotent() {
        let bounds = Boundary {
            min_x: Some(10.0),
            max_x: Some(200.0),
            min_y: Some(0.0),
            max_y: Some(150.0),
        };
        for p in [
            Position { x: -5.0, y: 500.0 },
            Position { x: 50.0, y: 50.0 },
            Position { x: 1000.0, y: -1.0 },
        ] {
            let once = clamp(p, &bounds);
            assert_eq!(clamp(once, &bounds), once);
        }
    }

    #[test]
    fn viewport_bounds_never_invert() {
        let b = Boundary::for_viewport(300.0, 150.0, 320.0, 200.0);
        assert_eq!(b.max_x, Some(0.0));
        assert_eq!(b.max_y, Some(0.0));
    }
}
