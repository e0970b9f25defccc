//! sortviz core (renderer-agnostic)
//!
//! Turns six classic sorting algorithms into uniform streams of [`StepEvent`]s
//! and plays them back one event per tick through an injected scheduling port.
//! Window construction, input parsing and widget rendering live in the host;
//! the host talks to this crate through [`RenderSink`], [`SchedulePort`] and
//! [`Clock`].

pub mod algorithm;
pub mod bars;
pub mod config;
pub mod error;
pub mod history;
pub mod ports;
pub mod producers;
pub mod step;
pub mod stopwatch;
pub mod virtual_clock;
pub mod visualizer;

// Re-exports for consumers (hosts/adapters)
pub use algorithm::Algorithm;
pub use bars::{BarColor, BarModel, NullSink, RecordingSink, RenderSink, SinkCall};
pub use config::Config;
pub use error::{Error, Result};
pub use history::{RunHistory, RunRecord, HISTORY_CAPACITY};
pub use ports::{Clock, MonotonicClock, SchedulePort, Task, TickHandle};
pub use producers::{replay, StepProducer};
pub use step::StepEvent;
pub use stopwatch::Stopwatch;
pub use virtual_clock::{VirtualClock, VirtualScheduler};
pub use visualizer::{RunState, Visualizer};
