//! Host-provided scheduling and time sources.
//!
//! The core never blocks or spawns. Instead it asks the host to call back
//! later through a [`SchedulePort`]; when the host's timer fires it hands the
//! `(TickHandle, Task)` pair back to
//! [`Visualizer::dispatch`](crate::Visualizer::dispatch).

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Opaque handle for one deferred callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// What a deferred callback should do when it fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Apply the next step event.
    Step,
    /// Refresh the live elapsed-time display.
    TimerPoll,
}

/// Deferred-callback port (e.g. a GUI toolkit's `after`/`after_cancel`).
pub trait SchedulePort {
    /// Arrange for `task` to be dispatched once, `delay_ms` from now.
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TickHandle;
    /// Withdraw a scheduled callback. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Monotonic time source in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<P: SchedulePort + ?Sized> SchedulePort for &mut P {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TickHandle {
        (**self).schedule(delay_ms, task)
    }
    fn cancel(&mut self, handle: TickHandle) {
        (**self).cancel(handle)
    }
}

/// Wall clock backed by [`Instant`], measured from construction.
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
