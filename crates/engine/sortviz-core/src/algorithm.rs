//! The fixed catalogue of animated algorithms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::producers::StepProducer;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    /// All algorithms in menu order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Stable identifier used in configs.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Display label recorded in the run history.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    /// One-paragraph explanation for an info panel.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Bubble => {
                "Compares neighbouring values and swaps them when needed; larger elements bubble to the end."
            }
            Algorithm::Selection => {
                "Finds the smallest remaining element on every pass and moves it into its final position."
            }
            Algorithm::Insertion => {
                "Inserts each new element at the right place in the already sorted left part."
            }
            Algorithm::Merge => {
                "Splits the list recursively, sorts both halves and merges them back in order."
            }
            Algorithm::Quick => {
                "Picks a pivot, partitions the list into smaller and larger values and sorts both parts recursively."
            }
            Algorithm::Heap => {
                "Arranges the values as a max-heap and repeatedly moves the largest element to the end."
            }
        }
    }

    pub fn advantages(self) -> &'static [&'static str] {
        match self {
            Algorithm::Bubble => &[
                "Very easy to understand and implement",
                "Detects already sorted input quickly thanks to the early exit",
            ],
            Algorithm::Selection => &[
                "Little memory and a predictable number of swaps",
                "Easy to follow step by step",
            ],
            Algorithm::Insertion => &[
                "Very efficient for small or nearly sorted lists",
                "Stable without extra data structures",
            ],
            Algorithm::Merge => &[
                "O(n log n) even in the worst case",
                "Stable, with a clear divide-and-conquer structure",
            ],
            Algorithm::Quick => &[
                "Very fast in practice thanks to in-place partitioning",
                "Good cache locality and little auxiliary memory",
            ],
            Algorithm::Heap => &[
                "O(n log n) regardless of the input",
                "Sorts in place with constant extra memory",
            ],
        }
    }

    pub fn disadvantages(self) -> &'static [&'static str] {
        match self {
            Algorithm::Bubble => &[
                "Very inefficient on larger inputs (O(n²))",
                "Many unnecessary comparisons and swaps",
            ],
            Algorithm::Selection => &[
                "Needs many comparisons (O(n²))",
                "Does not benefit from partially sorted input",
            ],
            Algorithm::Insertion => &[
                "Quadratic running time in the worst case",
                "Many shifts on strongly unsorted lists",
            ],
            Algorithm::Merge => &[
                "Needs extra memory for the merge buffers",
                "More involved to implement than the quadratic sorts",
            ],
            Algorithm::Quick => &[
                "O(n²) worst case with an unlucky pivot",
                "Not stable without extra work",
            ],
            Algorithm::Heap => &[
                "The heap is a less intuitive starting point",
                "Not stable and harder to follow visually",
            ],
        }
    }

    /// Create the step producer for `data`. The slice is copied.
    pub fn producer(self, data: &[i64]) -> StepProducer {
        StepProducer::new(self, data)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}
