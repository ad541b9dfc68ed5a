/// Single-shot deadline that pins a section when a drag is held long enough.
///
/// The deadline is plain data; the owner checks it against timestamps it
/// already has (frame ticks, pointer-up), so no real timer is involved and
/// tests can drive it with literal times.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldTimer {
    deadline_ms: Option<f64>,
}

impl HoldTimer {
    /// Arm the timer to fire `delay_ms` after `now_ms`. Re-arming replaces
    /// any previous deadline.
    pub fn start(&mut self, now_ms: f64, delay_ms: f64) {
        self.deadline_ms = Some(now_ms + delay_ms);
    }

    /// Disarm. Safe to call any number of times, armed or not.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// True exactly once when the deadline has elapsed; firing disarms the
    /// timer so it can never report twice without a new `start`.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(d) if now_ms >= d => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline_ms.is_some()
    }
}
