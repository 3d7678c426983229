//! Time sources for the scheduler.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time in seconds since the clock was created.
pub trait Clock {
    /// Seconds elapsed since start.
    fn now(&self) -> f64;

    /// Blocks for `duration`.
    fn sleep(&mut self, duration: Duration);

    /// Blocks until [`now`](Clock::now) reaches `deadline`.
    ///
    /// Returns immediately when the deadline has already passed.
    fn sleep_until(&mut self, deadline: f64) {
        let wait = deadline - self.now();
        if wait > 0.0 {
            self.sleep(Duration::from_secs_f64(wait));
        }
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Starts counting from now.
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated clock. Sleeping advances time instantly.
///
/// Clones share one timeline, so a simulated host can read the same time
/// the scheduler is advancing.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Rc<Cell<f64>>,
}

impl VirtualClock {
    /// Clock at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward without sleeping.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration.as_secs_f64());
    }

    /// Jumps straight to `deadline`, never backwards.
    ///
    /// Going through a [`Duration`] would round the gap to whole
    /// nanoseconds and could leave the clock just short of the deadline.
    fn sleep_until(&mut self, deadline: f64) {
        self.now.set(self.now.get().max(deadline));
    }
}
