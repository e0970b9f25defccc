//! Playback scheduler: the run state machine.
//!
//! ```text
//! Idle ──start──▶ Running ──pause──▶ Paused
//!                   ▲  │               │
//!                   │  └─exhausted─▶ Finished
//!                   └─────resume───────┘
//! any ──reset──▶ Idle
//! ```
//!
//! Exactly one step event is applied per tick. Between ticks the only live
//! deferred callbacks are at most one pending step and at most one pending
//! timer poll; every other handle the port reports back is stale and ignored.

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::bars::{BarModel, RenderSink};
use crate::config::Config;
use crate::history::RunHistory;
use crate::ports::{Clock, MonotonicClock, SchedulePort, Task, TickHandle};
use crate::producers::StepProducer;
use crate::stopwatch::Stopwatch;
use crate::virtual_clock::{VirtualClock, VirtualScheduler};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    /// Last run completed; accepts `start` like `Idle`, final colors stay visible.
    Finished,
}

impl RunState {
    /// A run is in progress (running or paused).
    pub fn is_active(self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }
}

/// Drives one producer at a time against a bar model and a render sink.
#[derive(Debug)]
pub struct Visualizer<P, S, C = MonotonicClock> {
    cfg: Config,
    port: P,
    sink: S,
    clock: C,

    state: RunState,
    producer: Option<StepProducer>,
    bars: Option<BarModel>,
    stopwatch: Stopwatch,
    history: RunHistory,
    events_applied: u64,
    writes_applied: u64,

    pending_step: Option<TickHandle>,
    pending_poll: Option<TickHandle>,
}

impl<P: SchedulePort, S: RenderSink> Visualizer<P, S, MonotonicClock> {
    /// Create a visualizer measuring wall-clock time.
    pub fn new(cfg: Config, port: P, sink: S) -> Self {
        Self::with_clock(cfg, port, sink, MonotonicClock::new())
    }
}

impl<S: RenderSink> Visualizer<VirtualScheduler, S, VirtualClock> {
    /// Create a visualizer on virtual time; drive it with [`run_for`](Self::run_for)
    /// or [`run_to_completion`](Self::run_to_completion).
    pub fn virtual_time(cfg: Config, sink: S) -> Self {
        let port = VirtualScheduler::new();
        let clock = port.clock();
        Self::with_clock(cfg, port, sink, clock)
    }
}

impl<P: SchedulePort, S: RenderSink, C: Clock> Visualizer<P, S, C> {
    pub fn with_clock(cfg: Config, port: P, sink: S, clock: C) -> Self {
        Self {
            cfg,
            port,
            sink,
            clock,
            state: RunState::Idle,
            producer: None,
            bars: None,
            stopwatch: Stopwatch::new(),
            history: RunHistory::new(),
            events_applied: 0,
            writes_applied: 0,
            pending_step: None,
            pending_poll: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Algorithm used by the next `start`.
    pub fn algorithm(&self) -> Algorithm {
        self.cfg.algorithm
    }

    /// Choose the algorithm for the next run. Refused while a run is active.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.state.is_active() {
            debug!("algorithm change to {algorithm} refused while {:?}", self.state);
            return false;
        }
        self.cfg.algorithm = algorithm;
        true
    }

    /// Bars of the current or last finished run.
    pub fn bars(&self) -> Option<&BarModel> {
        self.bars.as_ref()
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Step events applied in the current or last run.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Events of the current or last run that changed the array (swaps and overwrites).
    pub fn writes_applied(&self) -> u64 {
        self.writes_applied
    }

    /// Handle of the step callback currently armed, if any.
    pub fn pending_step(&self) -> Option<TickHandle> {
        self.pending_step
    }

    /// Stopwatch reading right now.
    pub fn elapsed_ms(&self) -> f64 {
        self.stopwatch.elapsed_ms(self.clock.now_ms())
    }

    /// Begin animating `data` with the configured algorithm.
    ///
    /// Applies the first event immediately. Returns `false` (and does nothing)
    /// while another run is active.
    pub fn start(&mut self, data: &[i64]) -> bool {
        if self.state.is_active() {
            debug!("start ignored while {:?}", self.state);
            return false;
        }
        self.cancel_step();
        self.cancel_poll();

        let algorithm = self.cfg.algorithm;
        self.sink.create_bars(data);
        self.bars = Some(BarModel::new(data));
        self.producer = Some(algorithm.producer(data));
        self.events_applied = 0;
        self.writes_applied = 0;
        self.state = RunState::Running;
        debug!("start {} over {} values", algorithm.key(), data.len());

        self.stopwatch.start(self.clock.now_ms());
        self.start_poll();
        self.step();
        true
    }

    /// Freeze playback between two ticks. Only valid while running.
    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.cancel_step();
        self.cancel_poll();
        let now = self.clock.now_ms();
        self.stopwatch.pause(now);
        self.sink.show_elapsed(self.stopwatch.elapsed_ms(now));
        self.state = RunState::Paused;
        debug!("paused after {} events", self.events_applied);
        true
    }

    /// Continue a paused run, applying the next event immediately.
    pub fn resume(&mut self) -> bool {
        if self.state != RunState::Paused {
            return false;
        }
        self.stopwatch.resume(self.clock.now_ms());
        self.state = RunState::Running;
        debug!("resumed at event {}", self.events_applied);
        self.start_poll();
        self.step();
        true
    }

    /// Pause when running, resume when paused (single pause/resume button).
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Idle | RunState::Finished => false,
        }
    }

    /// Drop the run, its bars and the whole run history. Valid in any state.
    pub fn reset(&mut self) {
        self.cancel_step();
        self.cancel_poll();
        self.producer = None;
        self.bars = None;
        self.history.clear();
        self.stopwatch.reset();
        self.events_applied = 0;
        self.writes_applied = 0;
        self.sink.clear();
        self.sink.show_elapsed(0.0);
        if self.state != RunState::Idle {
            debug!("reset from {:?}", self.state);
        }
        self.state = RunState::Idle;
    }

    /// Entry point for a fired deferred callback.
    ///
    /// Returns `false` when the handle is stale (cancelled, superseded or from
    /// a run that was reset), in which case nothing happens.
    pub fn dispatch(&mut self, handle: TickHandle, task: Task) -> bool {
        match task {
            Task::Step if self.pending_step == Some(handle) => {
                self.pending_step = None;
                self.step();
                true
            }
            Task::TimerPoll if self.pending_poll == Some(handle) => {
                self.pending_poll = None;
                self.poll_timer();
                true
            }
            _ => {
                trace!("stale {task:?} callback {handle:?}");
                false
            }
        }
    }

    /// One tick: apply the next event or complete the run.
    fn step(&mut self) {
        if self.state != RunState::Running || self.producer.is_none() {
            return;
        }
        match self.producer.as_mut().and_then(Iterator::next) {
            None => self.finish_run(),
            Some(event) => {
                if let Some(bars) = self.bars.as_mut() {
                    if bars.apply(event, &mut self.sink) {
                        debug!(
                            "sorted set covers all {} bars at event {}",
                            bars.len(),
                            self.events_applied + 1
                        );
                    }
                }
                self.events_applied += 1;
                if event.mutates() {
                    self.writes_applied += 1;
                }
                self.schedule_step();
            }
        }
    }

    /// Completion; producer exhaustion is the only trigger.
    fn finish_run(&mut self) {
        // Taking the producer makes completion run once per run.
        let Some(producer) = self.producer.take() else {
            return;
        };
        self.cancel_step();
        self.cancel_poll();

        let elapsed = self.stopwatch.stop(self.clock.now_ms());
        self.sink.show_elapsed(elapsed);
        let label = producer.algorithm().label();
        let record = self.history.record(label, elapsed);
        info!(
            "run {} ({}) finished: {} events, {} writes in {:.0} ms",
            record.sequence,
            record.label,
            self.events_applied,
            self.writes_applied,
            record.duration_ms
        );

        if let Some(bars) = self.bars.as_mut() {
            let missing: Vec<usize> = (0..bars.len()).filter(|i| !bars.is_sorted(*i)).collect();
            if !missing.is_empty() {
                warn!("{label} left indices {missing:?} unmarked; marking them now");
                for index in missing {
                    bars.mark_sorted(index, &mut self.sink);
                }
            }
        }
        self.state = RunState::Finished;
    }

    fn schedule_step(&mut self) {
        self.cancel_step();
        let delay = self.cfg.animation_delay_ms();
        self.pending_step = Some(self.port.schedule(delay, Task::Step));
    }

    fn cancel_step(&mut self) {
        if let Some(handle) = self.pending_step.take() {
            self.port.cancel(handle);
        }
    }

    fn start_poll(&mut self) {
        self.cancel_poll();
        self.poll_timer();
    }

    /// Publish the live reading and re-arm; only while actually running.
    fn poll_timer(&mut self) {
        if self.state != RunState::Running || !self.stopwatch.is_running() {
            return;
        }
        self.sink.show_elapsed(self.elapsed_ms());
        let interval = self.cfg.timer_poll_interval_ms();
        self.pending_poll = Some(self.port.schedule(interval, Task::TimerPoll));
    }

    fn cancel_poll(&mut self) {
        if let Some(handle) = self.pending_poll.take() {
            self.port.cancel(handle);
        }
    }
}

impl<S: RenderSink, C: Clock> Visualizer<VirtualScheduler, S, C> {
    /// Fire every callback due within the next `ms` of virtual time.
    /// Returns the number of live (non-stale) callbacks dispatched.
    pub fn run_for(&mut self, ms: u64) -> usize {
        let deadline = self.port.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some((handle, task)) = self.port.pop_due(deadline) {
            if self.dispatch(handle, task) {
                fired += 1;
            }
        }
        self.port.advance_to(deadline);
        fired
    }

    /// Fire callbacks until the active run completes.
    ///
    /// Returns `true` if the run reached `Finished`; `false` when nothing was
    /// running or the queue ran dry first (e.g. the run is paused).
    pub fn run_to_completion(&mut self) -> bool {
        while self.state == RunState::Running {
            match self.port.pop_next() {
                Some((handle, task)) => {
                    self.dispatch(handle, task);
                }
                None => return false,
            }
        }
        self.state == RunState::Finished
    }
}
