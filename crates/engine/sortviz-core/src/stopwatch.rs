//! Pausable stopwatch measuring the playback time of one run.
//!
//! Timestamps are passed in by the caller (see [`Clock`](crate::Clock)), so
//! the stopwatch itself is pure and deterministic under a virtual clock.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stopwatch {
    /// Time folded in from previous running segments.
    accumulated_ms: f64,
    /// Start of the current running segment; `None` while frozen or stopped.
    base_ms: Option<f64>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the total and start measuring from `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.accumulated_ms = 0.0;
        self.base_ms = Some(now_ms);
    }

    /// Freeze: fold the running segment into the total.
    pub fn pause(&mut self, now_ms: f64) {
        self.fold(now_ms);
    }

    /// Unfreeze without touching the total. No-op while already running.
    pub fn resume(&mut self, now_ms: f64) {
        if self.base_ms.is_none() {
            self.base_ms = Some(now_ms);
        }
    }

    /// Finalize and return the total in milliseconds.
    pub fn stop(&mut self, now_ms: f64) -> f64 {
        self.fold(now_ms);
        self.accumulated_ms
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.base_ms.is_some()
    }

    /// Current reading; stable while frozen.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match self.base_ms {
            Some(base) => self.accumulated_ms + (now_ms - base).max(0.0),
            None => self.accumulated_ms,
        }
    }

    fn fold(&mut self, now_ms: f64) {
        if let Some(base) = self.base_ms.take() {
            self.accumulated_ms += (now_ms - base).max(0.0);
        }
    }
}
