use std::collections::VecDeque;

use crate::gravity::GravitySim;
use crate::hold::HoldTimer;
use crate::position::{Boundary, Position, clamp};

/// Tuning constants for dragging and the release physics.
#[derive(Clone, Copy, Debug)]
pub struct DragConfig {
    /// Hold duration that pins a section, in milliseconds.
    pub hold_to_fix_ms: f64,
    /// Downward acceleration added to the vertical velocity each frame.
    pub gravity: f64,
    /// Fraction of horizontal velocity kept per frame.
    pub friction: f64,
    /// Vertical damping applied per frame.
    pub air_drag: f64,
    /// Fraction of vertical speed kept after bouncing off the floor.
    pub bounce: f64,
    /// Impact speed below which a bounce comes to rest instead.
    pub bounce_stop: f64,
    /// Overall speed under which the settle animation stops.
    pub rest_speed: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            hold_to_fix_ms: 1000.0,
            gravity: 0.3,
            friction: 0.96,
            air_drag: 0.98,
            bounce: 0.75,
            bounce_stop: 0.8,
            rest_speed: 0.1,
        }
    }
}

/// Notifications queued during state updates and drained by the host
/// afterwards, so the controller never reenters host logic mid-update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// A drag began; hosts raise the section's stacking order on this.
    DragStarted,
    /// The section moved, by dragging or by the settle animation.
    PositionChanged(Position),
    /// The pinned flag was gained or released.
    FixedChanged(bool),
    /// The settle animation ran to completion.
    SettleEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging,
    Fixed,
    Settling,
}

/// Captured at pointer-down and kept for the whole drag: the start point
/// and the pointer-to-origin vector that glues the card to the pointer.
#[derive(Clone, Copy, Debug)]
struct DragState {
    drag_start: Position,
    element_offset: Position,
}

/// State machine owning one section's position.
///
/// Drives the four phases Idle / Dragging / Fixed / Settling. All waiting is
/// expressed through timestamps the host passes in: `performance.now()` for
/// pointer events, the `requestAnimationFrame` timestamp for [`on_frame`].
/// Dragging and settling are mutually exclusive because a pointer-down
/// always cancels a running simulation before starting a drag.
///
/// [`on_frame`]: DragController::on_frame
pub struct DragController {
    config: DragConfig,
    bounds: Boundary,
    initial: Position,
    position: Position,
    phase: Phase,
    drag: Option<DragState>,
    hold: HoldTimer,
    sim: Option<GravitySim>,
    events: VecDeque<DragEvent>,
}

impl DragController {
    pub fn new(initial: Position, bounds: Boundary, config: DragConfig) -> Self {
        DragController {
            config,
            bounds,
            initial,
            position: clamp(initial, &bounds),
            phase: Phase::Idle,
            drag: None,
            hold: HoldTimer::default(),
            sim: None,
            events: VecDeque::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_fixed(&self) -> bool {
        self.phase == Phase::Fixed
    }

    pub fn is_settling(&self) -> bool {
        self.phase == Phase::Settling
    }

    /// Pointer location at drag start, while a drag is active.
    pub fn drag_start(&self) -> Option<Position> {
        self.drag.map(|d| d.drag_start)
    }

    /// Reseed from the externally supplied initial value. Silent: reseeding
    /// comes *from* the store, so echoing a change event back would loop.
    pub fn seed_position(&mut self, pos: Position) {
        self.initial = pos;
        self.position = clamp(pos, &self.bounds);
    }

    /// Adopt a new legal rectangle (the host recomputes it on viewport
    /// resize) and re-clamp the current position into it.
    pub fn set_bounds(&mut self, bounds: Boundary) {
        self.bounds = bounds;
        let next = clamp(self.position, &self.bounds);
        self.move_to(next);
    }

    /// Begin tracking the pointer, or unpin if currently fixed (toggle
    /// gesture); an unpin consumes the event without starting a drag.
    pub fn pointer_down(&mut self, pointer: Position, now_ms: f64) {
        if self.phase == Phase::Fixed {
            self.phase = Phase::Idle;
            self.events.push_back(DragEvent::FixedChanged(false));
            return;
        }
        self.cancel_settle();
        self.drag = Some(DragState {
            drag_start: pointer,
            element_offset: Position {
                x: pointer.x - self.position.x,
                y: pointer.y - self.position.y,
            },
        });
        self.phase = Phase::Dragging;
        self.hold.start(now_ms, self.config.hold_to_fix_ms);
        self.events.push_back(DragEvent::DragStarted);
    }

    /// Follow the pointer while dragging; ignored in every other phase.
    pub fn pointer_move(&mut self, pointer: Position) {
        if self.phase != Phase::Dragging {
            return;
        }
        let Some(drag) = self.drag else { return };
        let next = clamp(
            Position {
                x: pointer.x - drag.element_offset.x,
                y: pointer.y - drag.element_offset.y,
            },
            &self.bounds,
        );
        self.move_to(next);
    }

    /// End the drag. The hold deadline may have elapsed since the last
    /// frame tick, so it is honored here before deciding whether to settle;
    /// an unfixed release over a floored boundary starts the gravity drop.
    pub fn pointer_up(&mut self, now_ms: f64) {
        if self.phase != Phase::Dragging {
            return;
        }
        self.drag = None;
        if self.hold.fire(now_ms) {
            self.phase = Phase::Fixed;
            self.events.push_back(DragEvent::FixedChanged(true));
            return;
        }
        self.hold.cancel();
        if self.bounds.max_y.is_some() {
            // Without a floor the drop could never terminate.
            self.phase = Phase::Settling;
            self.sim = Some(GravitySim::new());
        } else {
            self.phase = Phase::Idle;
        }
    }

    /// Advance the hold deadline and the settle animation one frame.
    /// Returns true while another frame is needed.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        match self.phase {
            Phase::Dragging => {
                if self.hold.fire(now_ms) {
                    self.drag = None;
                    self.phase = Phase::Fixed;
                    self.events.push_back(DragEvent::FixedChanged(true));
                    return false;
                }
                true
            }
            Phase::Settling => {
                let Some(sim) = self.sim.as_mut() else {
                    self.phase = Phase::Idle;
                    return false;
                };
                let out = sim.step(self.position, &self.bounds, &self.config);
                self.move_to(out.position);
                if out.done {
                    self.sim = None;
                    self.phase = Phase::Idle;
                    self.events.push_back(DragEvent::SettleEnded);
                    return false;
                }
                true
            }
            Phase::Idle | Phase::Fixed => false,
        }
    }

    /// Externally force or release the pin, cancelling any drag, pending
    /// hold deadline and running simulation.
    pub fn set_fixed(&mut self, fixed: bool) {
        if fixed == self.is_fixed() {
            return;
        }
        self.hold.cancel();
        self.cancel_settle();
        self.drag = None;
        self.phase = if fixed { Phase::Fixed } else { Phase::Idle };
        self.events.push_back(DragEvent::FixedChanged(fixed));
    }

    /// Clamp and adopt an externally chosen position, notifying on change.
    pub fn set_position(&mut self, pos: Position) {
        let next = clamp(pos, &self.bounds);
        self.move_to(next);
    }

    /// Restore the seeded position and drop all transient state: fixed
    /// flag, drag capture, hold deadline and simulation.
    pub fn reset(&mut self) {
        self.hold.cancel();
        self.cancel_settle();
        self.drag = None;
        if self.phase == Phase::Fixed {
            self.events.push_back(DragEvent::FixedChanged(false));
        }
        self.phase = Phase::Idle;
        self.move_to(clamp(self.initial, &self.bounds));
    }

    /// Take the notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<DragEvent> {
        self.events.drain(..).collect()
    }

    fn move_to(&mut self, next: Position) {
        if next != self.position {
            self.position = next;
            self.events.push_back(DragEvent::PositionChanged(next));
        }
    }

    fn cancel_settle(&mut self) {
        self.sim = None;
        if self.phase == Phase::Settling {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_bounds() -> Boundary {
        Boundary::default()
    }

    fn floored() -> Boundary {
        Boundary {
            min_x: Some(0.0),
            min_y: Some(0.0),
            max_x: Some(1000.0),
            max_y: Some(400.0),
        }
    }

    fn controller(initial: Position, bounds: Boundary) -> DragController {
        DragController::new(initial, bounds, DragConfig::default())
    }

    fn positions(events: &[DragEvent]) -> Vec<Position> {
        events
            .iter()
            .filter_map(|e| match e {
                DragEvent::PositionChanged(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn drag_keeps_pointer_offset() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, open_bounds());
        c.pointer_down(Position { x: 100.0, y: 100.0 }, 0.0);
        assert_eq!(c.drag_start(), Some(Position { x: 100.0, y: 100.0 }));
        c.pointer_move(Position { x: 150.0, y: 140.0 });
        assert_eq!(c.position(), Position { x: 70.0, y: 60.0 });
        let events = c.drain_events();
        assert_eq!(events[0], DragEvent::DragStarted);
        assert_eq!(positions(&events), vec![Position { x: 70.0, y: 60.0 }]);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, open_bounds());
        c.pointer_move(Position { x: 500.0, y: 500.0 });
        c.pointer_up(0.0);
        assert_eq!(c.position(), Position { x: 20.0, y: 20.0 });
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn drag_positions_stay_clamped() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.pointer_down(Position { x: 20.0, y: 20.0 }, 0.0);
        c.pointer_move(Position { x: -300.0, y: 900.0 });
        assert_eq!(c.position(), Position { x: 0.0, y: 400.0 });
    }

    #[test]
    fn release_settles_to_floor_and_stops() {
        let mut c = controller(Position { x: 100.0, y: 100.0 }, floored());
        c.pointer_down(Position { x: 110.0, y: 110.0 }, 0.0);
        c.pointer_up(100.0);
        assert!(c.is_settling());
        let mut now = 100.0;
        for _ in 0..2000 {
            now += 16.0;
            if !c.on_frame(now) {
                break;
            }
        }
        assert!(!c.is_settling());
        assert_eq!(c.position().y, 400.0);
        let events = c.drain_events();
        assert_eq!(events.last(), Some(&DragEvent::SettleEnded));
        // Frames after settling are inert.
        assert!(!c.on_frame(now + 16.0));
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn release_without_floor_goes_idle() {
        let mut c = controller(Position { x: 100.0, y: 100.0 }, open_bounds());
        c.pointer_down(Position { x: 100.0, y: 100.0 }, 0.0);
        c.pointer_up(100.0);
        assert!(!c.is_settling());
        assert!(!c.on_frame(200.0));
    }

    #[test]
    fn pointer_down_cancels_settling() {
        let mut c = controller(Position { x: 100.0, y: 100.0 }, floored());
        c.pointer_down(Position { x: 100.0, y: 100.0 }, 0.0);
        c.pointer_up(100.0);
        c.on_frame(116.0);
        assert!(c.is_settling());
        c.drain_events();

        c.pointer_down(Position { x: 120.0, y: 120.0 }, 200.0);
        assert!(c.is_dragging());
        assert!(!c.is_settling());
        // The simulator must emit nothing further.
        let events = c.drain_events();
        assert_eq!(events, vec![DragEvent::DragStarted]);
        c.on_frame(216.0);
        assert!(positions(&c.drain_events()).is_empty());
    }

    #[test]
    fn holding_pins_exactly_once() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 0.0);
        assert!(c.on_frame(999.0));
        assert!(!c.is_fixed());
        c.on_frame(1000.0);
        assert!(c.is_fixed());
        let fixes: Vec<_> = c
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, DragEvent::FixedChanged(true)))
            .collect();
        assert_eq!(fixes.len(), 1);
        // Pinned sections neither drag nor settle.
        c.pointer_move(Position { x: 500.0, y: 500.0 });
        c.pointer_up(1100.0);
        assert!(c.is_fixed());
        assert!(!c.is_settling());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn quick_release_never_pins() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 0.0);
        c.pointer_up(500.0);
        assert!(!c.is_fixed());
        assert!(
            !c.drain_events()
                .iter()
                .any(|e| matches!(e, DragEvent::FixedChanged(_)))
        );
    }

    #[test]
    fn release_after_deadline_pins_instead_of_settling() {
        // No frame tick ran between the deadline and the release; the
        // release itself must honor the elapsed hold.
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 0.0);
        c.pointer_up(1005.0);
        assert!(c.is_fixed());
        assert!(!c.is_settling());
    }

    #[test]
    fn pointer_down_while_fixed_unpins_without_dragging() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.set_fixed(true);
        c.drain_events();
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 0.0);
        assert!(!c.is_fixed());
        assert!(!c.is_dragging());
        assert_eq!(c.drain_events(), vec![DragEvent::FixedChanged(false)]);
        // The next pointer-down starts a normal drag.
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 100.0);
        assert!(c.is_dragging());
    }

    #[test]
    fn set_fixed_cancels_simulation_and_timer() {
        let mut c = controller(Position { x: 100.0, y: 100.0 }, floored());
        c.pointer_down(Position { x: 100.0, y: 100.0 }, 0.0);
        c.pointer_up(100.0);
        assert!(c.is_settling());
        c.set_fixed(true);
        assert!(c.is_fixed());
        c.drain_events();
        assert!(!c.on_frame(2000.0));
        assert!(c.drain_events().is_empty());
        // Redundant calls are no-ops.
        c.set_fixed(true);
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn reset_restores_seed_and_clears_everything() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.pointer_down(Position { x: 30.0, y: 30.0 }, 0.0);
        c.pointer_move(Position { x: 300.0, y: 300.0 });
        c.on_frame(1000.0);
        assert!(c.is_fixed());
        c.drain_events();

        c.reset();
        assert_eq!(c.position(), Position { x: 20.0, y: 20.0 });
        assert!(!c.is_fixed());
        assert!(!c.is_dragging());
        assert!(!c.is_settling());
        let events = c.drain_events();
        assert!(events.contains(&DragEvent::FixedChanged(false)));
        assert!(events.contains(&DragEvent::PositionChanged(Position { x: 20.0, y: 20.0 })));
        // No pending timer or simulation survives.
        assert!(!c.on_frame(10_000.0));
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn seed_position_is_silent() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.seed_position(Position { x: 40.0, y: 60.0 });
        assert_eq!(c.position(), Position { x: 40.0, y: 60.0 });
        assert!(c.drain_events().is_empty());
        c.reset();
        assert_eq!(c.position(), Position { x: 40.0, y: 60.0 });
    }

    #[test]
    fn set_position_clamps_and_notifies() {
        let mut c = controller(Position { x: 20.0, y: 20.0 }, floored());
        c.set_position(Position { x: -50.0, y: 500.0 });
        assert_eq!(c.position(), Position { x: 0.0, y: 400.0 });
        assert_eq!(
            positions(&c.drain_events()),
            vec![Position { x: 0.0, y: 400.0 }]
        );
    }

    #[test]
    fn shrinking_bounds_reclamps_current_position() {
        let mut c = controller(Position { x: 500.0, y: 300.0 }, floored());
        c.set_bounds(Boundary {
            min_x: Some(0.0),
            min_y: Some(0.0),
            max_x: Some(200.0),
            max_y: Some(200.0),
        });
        assert_eq!(c.position(), Position { x: 200.0, y: 200.0 });
    }
}
