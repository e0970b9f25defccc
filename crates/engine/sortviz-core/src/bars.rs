//! Bar model and the render sink it drives.
//!
//! The bar model is the single owner of the array snapshot and the per-bar
//! highlight state during a run. Renderers never read it directly; they get
//! explicit calls on a [`RenderSink`].

use hashbrown::HashSet;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::step::StepEvent;

/// Display state of one bar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    #[default]
    Default,
    /// Being compared.
    Compare,
    /// Just written (swap or overwrite).
    Active,
    /// In its final position.
    Sorted,
}

impl BarColor {
    /// Palette used by the reference renderer.
    pub fn hex(self) -> &'static str {
        match self {
            BarColor::Default => "#4a90e2",
            BarColor::Compare => "#f5d76e",
            BarColor::Active => "#f85f5f",
            BarColor::Sorted => "#2ecc71",
        }
    }
}

/// Renderer-side collaborator.
pub trait RenderSink {
    /// Replace all bars with one bar per value, in default color.
    fn create_bars(&mut self, values: &[i64]);
    fn update_bar(&mut self, index: usize, value: i64);
    fn set_color(&mut self, index: usize, color: BarColor);
    /// Remove all bars.
    fn clear(&mut self);
    /// Live elapsed-time readout. Optional.
    fn show_elapsed(&mut self, _elapsed_ms: f64) {}
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn create_bars(&mut self, values: &[i64]) {
        (**self).create_bars(values)
    }
    fn update_bar(&mut self, index: usize, value: i64) {
        (**self).update_bar(index, value)
    }
    fn set_color(&mut self, index: usize, color: BarColor) {
        (**self).set_color(index, color)
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn show_elapsed(&mut self, elapsed_ms: f64) {
        (**self).show_elapsed(elapsed_ms)
    }
}

/// Sink that drops everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn create_bars(&mut self, _values: &[i64]) {}
    fn update_bar(&mut self, _index: usize, _value: i64) {}
    fn set_color(&mut self, _index: usize, _color: BarColor) {}
    fn clear(&mut self) {}
}

/// One call received by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SinkCall {
    CreateBars { values: Vec<i64> },
    UpdateBar { index: usize, value: i64 },
    SetColor { index: usize, color: BarColor },
    Clear,
    ShowElapsed { elapsed_ms: f64 },
}

/// Sink that keeps a transcript of every call, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Drain the transcript.
    pub fn take(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    /// Last color set on `index`, if any.
    pub fn last_color(&self, index: usize) -> Option<BarColor> {
        self.calls.iter().rev().find_map(|c| match c {
            SinkCall::SetColor { index: i, color } if *i == index => Some(*color),
            _ => None,
        })
    }

    /// Last elapsed value shown, if any.
    pub fn last_elapsed(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            SinkCall::ShowElapsed { elapsed_ms } => Some(*elapsed_ms),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn create_bars(&mut self, values: &[i64]) {
        self.calls.push(SinkCall::CreateBars {
            values: values.to_vec(),
        });
    }
    fn update_bar(&mut self, index: usize, value: i64) {
        self.calls.push(SinkCall::UpdateBar { index, value });
    }
    fn set_color(&mut self, index: usize, color: BarColor) {
        self.calls.push(SinkCall::SetColor { index, color });
    }
    fn clear(&mut self) {
        self.calls.push(SinkCall::Clear);
    }
    fn show_elapsed(&mut self, elapsed_ms: f64) {
        self.calls.push(SinkCall::ShowElapsed { elapsed_ms });
    }
}

/// Index-addressed bar state of one run: values, colors and the sorted set.
#[derive(Clone, Debug, Default)]
pub struct BarModel {
    values: Vec<i64>,
    colors: Vec<BarColor>,
    sorted: HashSet<usize>,
    /// Value range captured at creation, used for bar heights.
    min: i64,
    span: i64,
}

impl BarModel {
    pub fn new(values: &[i64]) -> Self {
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        Self {
            values: values.to_vec(),
            colors: vec![BarColor::Default; values.len()],
            sorted: HashSet::with_capacity(values.len()),
            min,
            span: max.saturating_sub(min).max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current array snapshot.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn colors(&self) -> &[BarColor] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> Option<BarColor> {
        self.colors.get(index).copied()
    }

    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.contains(&index)
    }

    pub fn sorted_count(&self) -> usize {
        self.sorted.len()
    }

    /// Sorted-set members in ascending order.
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.sorted.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Whether every index is in the sorted set (vacuously true when empty).
    pub fn all_sorted(&self) -> bool {
        self.sorted.len() == self.values.len()
    }

    /// Bar height in `[0, 1]` relative to the value range at creation.
    pub fn height_fraction(&self, index: usize) -> Option<f64> {
        let value = *self.values.get(index)?;
        let normalized = (value.saturating_sub(self.min)) as f64 / self.span as f64;
        Some(normalized.clamp(0.0, 1.0))
    }

    /// Apply one event, mirroring its effect onto `sink`.
    ///
    /// Returns `true` when this event made the sorted set cover every index
    /// for the first time. Events referencing an index outside the array are
    /// ignored.
    pub fn apply<S: RenderSink + ?Sized>(&mut self, event: StepEvent, sink: &mut S) -> bool {
        let n = self.values.len();
        if event.max_index() >= n {
            warn!("ignoring {event:?}: index out of range for {n} bars");
            return false;
        }
        trace!("apply {event:?}");

        match event {
            StepEvent::Compare(i, j) => {
                self.paint(i, BarColor::Compare, sink);
                self.paint(j, BarColor::Compare, sink);
            }
            StepEvent::Swap(i, j) => {
                self.values.swap(i, j);
                sink.update_bar(i, self.values[i]);
                sink.update_bar(j, self.values[j]);
                self.paint(i, BarColor::Active, sink);
                self.paint(j, BarColor::Active, sink);
            }
            StepEvent::Overwrite { index, value } => {
                self.values[index] = value;
                sink.update_bar(index, value);
                self.paint(index, BarColor::Active, sink);
            }
            StepEvent::Revert(i, j) => {
                self.revert(i, sink);
                self.revert(j, sink);
            }
            StepEvent::MarkSorted(i) => return self.mark_sorted(i, sink),
        }
        false
    }

    /// Add `index` to the sorted set. Same return contract as [`apply`](Self::apply).
    pub fn mark_sorted<S: RenderSink + ?Sized>(&mut self, index: usize, sink: &mut S) -> bool {
        if index >= self.values.len() {
            return false;
        }
        let newly = self.sorted.insert(index);
        self.paint(index, BarColor::Sorted, sink);
        newly && self.all_sorted()
    }

    fn revert<S: RenderSink + ?Sized>(&mut self, index: usize, sink: &mut S) {
        // Sorted color wins over a late revert.
        if !self.sorted.contains(&index) {
            self.paint(index, BarColor::Default, sink);
        }
    }

    fn paint<S: RenderSink + ?Sized>(&mut self, index: usize, color: BarColor, sink: &mut S) {
        self.colors[index] = color;
        sink.set_color(index, color);
    }
}
