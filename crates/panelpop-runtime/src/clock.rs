//! Millisecond tick sources for frame pacing

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond counter.
///
/// The loop only ever subtracts two readings, so the origin is arbitrary.
pub trait TickSource {
    /// Milliseconds elapsed since the source's origin
    fn now_ms(&self) -> u64;
}

/// Wall-clock tick source, counting from its own creation
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TickSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven tick source for deterministic stepping.
///
/// Clones share the same counter, so a test can keep one handle while the
/// loop owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    ticks: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u64) {
        self.ticks.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.ticks.set(self.ticks.get() + ms);
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ticks.get()
    }
}
