use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

/// Lomuto partition of `low..=high` in progress; pivot is `data[high]`.
#[derive(Clone, Debug)]
struct Partition {
    low: usize,
    high: usize,
    boundary: usize,
    j: usize,
    pivot: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Sorting,
    Marking(usize),
    Done,
}

/// Quicksort (Lomuto, last element as pivot) with an explicit range stack.
#[derive(Clone, Debug)]
pub(crate) struct QuickCursor {
    data: Vec<i64>,
    /// Non-empty inclusive ranges still to sort; top of stack goes first.
    ranges: Vec<(usize, usize)>,
    partition: Option<Partition>,
    phase: Phase,
}

impl QuickCursor {
    pub fn new(data: Vec<i64>) -> Self {
        let n = data.len();
        let (ranges, phase) = if n > 0 {
            (vec![(0, n - 1)], Phase::Sorting)
        } else {
            (Vec::new(), Phase::Done)
        };
        Self {
            data,
            ranges,
            partition: None,
            phase,
        }
    }

    fn scan(&mut self, out: &mut VecDeque<StepEvent>) {
        let Some(p) = self.partition.as_mut() else {
            return;
        };

        if p.j < p.high {
            let j = p.j;
            out.push_back(StepEvent::Compare(j, p.high));
            if self.data[j] <= p.pivot {
                if p.boundary != j {
                    self.data.swap(p.boundary, j);
                    out.push_back(StepEvent::Swap(p.boundary, j));
                    out.push_back(StepEvent::Revert(p.boundary, j));
                }
                p.boundary += 1;
            }
            out.push_back(StepEvent::Revert(j, p.high));
            p.j += 1;
            return;
        }

        let (low, high, b) = (p.low, p.high, p.boundary);
        self.partition = None;
        self.data.swap(b, high);
        out.push_back(StepEvent::Swap(b, high));
        out.push_back(StepEvent::Revert(b, high));
        out.push_back(StepEvent::MarkSorted(b));
        if b < high {
            self.ranges.push((b + 1, high));
        }
        if b > low {
            self.ranges.push((low, b - 1));
        }
    }
}

impl Cursor for QuickCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        match self.phase {
            Phase::Sorting => {
                if self.partition.is_some() {
                    self.scan(out);
                    return true;
                }
                match self.ranges.pop() {
                    // A one-element array is covered by the final sweep alone.
                    Some((low, high)) if low == high => {
                        if self.data.len() > 1 {
                            out.push_back(StepEvent::MarkSorted(low));
                        }
                    }
                    Some((low, high)) => {
                        self.partition = Some(Partition {
                            low,
                            high,
                            boundary: low,
                            j: low,
                            pivot: self.data[high],
                        });
                    }
                    None => self.phase = Phase::Marking(0),
                }
                true
            }
            Phase::Marking(index) => {
                if index < self.data.len() {
                    out.push_back(StepEvent::MarkSorted(index));
                    self.phase = Phase::Marking(index + 1);
                } else {
                    self.phase = Phase::Done;
                }
                true
            }
            Phase::Done => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::algorithm::Algorithm;
    use crate::producers::replay;
    use crate::step::StepEvent::{self, *};

    #[test]
    fn first_partition_uses_last_element_as_pivot() {
        let data = [5, 3, 4, 1, 2];
        let events = drain(Algorithm::Quick, &data);
        assert_eq!(events[0], Compare(0, 4));

        let first_mark = events.iter().position(|e| matches!(e, MarkSorted(_))).unwrap();
        assert_eq!(events[first_mark], MarkSorted(1));
        let after_partition = replay(&data, events[..first_mark].iter().copied());
        assert_eq!(after_partition.values()[..2], [1, 2]);
        let mut right = after_partition.values()[2..].to_vec();
        right.sort();
        assert_eq!(right, vec![3, 4, 5]);
    }

    #[test]
    fn pivot_swap_is_emitted_even_in_place() {
        let events = drain(Algorithm::Quick, &[1, 2]);
        assert_eq!(
            events,
            vec![
                Compare(0, 1),
                Revert(0, 1),
                Swap(1, 1),
                Revert(1, 1),
                MarkSorted(1),
                MarkSorted(0),
                MarkSorted(0),
                MarkSorted(1),
            ]
        );
    }

    #[test]
    fn single_element_marked_once_by_the_sweep() {
        assert_eq!(drain(Algorithm::Quick, &[7]), vec![MarkSorted(0)]);
        // Singleton sub-ranges of longer arrays keep their own mark.
        let events = drain(Algorithm::Quick, &[2, 1, 3]);
        assert_eq!(marks(&events).len(), 3 + 3);
    }

    #[test]
    fn final_sweep_marks_every_index() {
        let events: Vec<StepEvent> = drain(Algorithm::Quick, &[3, 3, 1, 8, 2]);
        let tail: Vec<usize> = marks(&events).into_iter().rev().take(5).collect();
        assert_eq!(tail, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn sorts_reference_input() {
        assert_eq!(sorted_by(Algorithm::Quick, &[5, 3, 4, 1, 2]), vec![1, 2, 3, 4, 5]);
    }
}
