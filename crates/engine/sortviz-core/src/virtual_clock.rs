//! Deterministic in-process scheduling port and clock.
//!
//! Time only moves when the host says so, which makes playback reproducible
//! for tests, benches and headless transcript generation.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::ports::{Clock, SchedulePort, Task, TickHandle};

/// Clock view onto a [`VirtualScheduler`]'s time.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    now: Rc<Cell<u64>>,
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> f64 {
        self.now.get() as f64
    }
}

/// Timer queue ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Rc<Cell<u64>>,
    next_handle: u64,
    queue: BTreeMap<(u64, TickHandle), Task>,
    due_by_handle: HashMap<TickHandle, u64>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock sharing this scheduler's time.
    pub fn clock(&self) -> VirtualClock {
        VirtualClock {
            now: Rc::clone(&self.now),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now.get()
    }

    /// Number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pending callbacks for `task`.
    pub fn pending_of(&self, task: Task) -> usize {
        self.queue.values().filter(|t| **t == task).count()
    }

    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.due_by_handle.contains_key(&handle)
    }

    /// Due time of the earliest pending callback.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest callback due at or before `until_ms`, moving time to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TickHandle, Task)> {
        let due = self.next_due()?;
        if due > until_ms {
            return None;
        }
        self.pop_front()
    }

    /// Pop the earliest callback regardless of due time, moving time forward to it.
    pub fn pop_next(&mut self) -> Option<(TickHandle, Task)> {
        self.pop_front()
    }

    /// Move time forward to `at_ms` without firing anything. Never moves back.
    pub fn advance_to(&mut self, at_ms: u64) {
        if at_ms > self.now.get() {
            self.now.set(at_ms);
        }
    }

    fn pop_front(&mut self) -> Option<(TickHandle, Task)> {
        let ((due, handle), task) = self.queue.pop_first()?;
        self.due_by_handle.remove(&handle);
        self.advance_to(due);
        Some((handle, task))
    }
}

impl SchedulePort for VirtualScheduler {
    fn schedule(&mut self, delay_ms: u64, task: Task) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let due = self.now.get().saturating_add(delay_ms);
        self.queue.insert((due, handle), task);
        self.due_by_handle.insert(handle, due);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(due) = self.due_by_handle.remove(&handle) {
            self.queue.remove(&(due, handle));
        }
    }
}

impl Clock for VirtualScheduler {
    fn now_ms(&self) -> f64 {
        self.now.get() as f64
    }
}
