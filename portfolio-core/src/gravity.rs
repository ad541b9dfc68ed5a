use crate::controller::DragConfig;
use crate::position::{Boundary, Position, clamp};

/// Result of one integrator step.
#[derive(Clone, Copy, Debug)]
pub struct StepOutcome {
    pub position: Position,
    /// The trajectory has come to rest; no further steps must be scheduled.
    pub done: bool,
}

/// Per-frame falling/bounce integrator driving a released section down to
/// the lower boundary. One instance exists only while a section is
/// settling; cancellation is simply dropping it.
///
/// Release velocity is zero on both axes (the deterministic policy), so the
/// whole trajectory is a function of the constants and the release height.
#[derive(Clone, Copy, Debug, Default)]
pub struct GravitySim {
    vx: f64,
    vy: f64,
}

impl GravitySim {
    pub fn new() -> Self {
        GravitySim::default()
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    /// Advance one frame from `pos`. Gravity accelerates, drag decays both
    /// axes, the floor reflects the vertical velocity with an energy loss,
    /// and an impact below `bounce_stop` (or an overall speed below
    /// `rest_speed`) ends the trajectory.
    pub fn step(&mut self, pos: Position, bounds: &Boundary, cfg: &DragConfig) -> StepOutcome {
        self.vy += cfg.gravity;
        self.vx *= cfg.friction;
        self.vy *= cfg.air_drag;
        let next = clamp(
            Position {
                x: pos.x + self.vx,
                y: pos.y + self.vy,
            },
            bounds,
        );
        let mut done = false;
        if let Some(floor) = bounds.max_y
            && next.y >= floor
            && self.vy > 0.0
        {
            self.vy = -self.vy * cfg.bounce;
            if self.vy.abs() < cfg.bounce_stop {
                self.vy = 0.0;
                done = true;
            }
        }
        if self.vx.abs() <= cfg.rest_speed && self.vy.abs() <= cfg.rest_speed {
            done = true;
        }
        StepOutcome {
            position: next,
            done,
        }
    }
}
