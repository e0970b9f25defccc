//! Atomic visualization events emitted by the step producers.

use serde::{Deserialize, Serialize};

/// One sorting micro-operation.
///
/// Indices always address the array the producer was created from.
/// Every `Compare`/`Swap` is followed by a `Revert` of the same pair before
/// either index is touched again, unless a `MarkSorted` supersedes it. The one
/// exception is nesting: quicksort may swap a compared index and revert that
/// swap before reverting the outer compare.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    /// Highlight two bars being compared.
    Compare(usize, usize),
    /// Exchange the values at two indices.
    Swap(usize, usize),
    /// Write `value` at `index` (merge sort writes back from its buffers).
    Overwrite { index: usize, value: i64 },
    /// Drop the transient highlight of two bars.
    Revert(usize, usize),
    /// Fix an index in its final position.
    MarkSorted(usize),
}

impl StepEvent {
    /// Whether this event changes the array contents.
    pub fn mutates(&self) -> bool {
        matches!(self, StepEvent::Swap(..) | StepEvent::Overwrite { .. })
    }

    /// Largest index referenced by the event.
    pub fn max_index(&self) -> usize {
        match *self {
            StepEvent::Compare(i, j) | StepEvent::Swap(i, j) | StepEvent::Revert(i, j) => i.max(j),
            StepEvent::Overwrite { index, .. } => index,
            StepEvent::MarkSorted(i) => i,
        }
    }
}
