use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

/// Pending work on the explicit recursion stack.
#[derive(Copy, Clone, Debug)]
enum Frame {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// A merge in progress: copies of both halves plus read/write heads.
#[derive(Clone, Debug)]
struct Merging {
    left_part: Vec<i64>,
    right_part: Vec<i64>,
    left: usize,
    mid: usize,
    i: usize,
    j: usize,
    k: usize,
}

impl Merging {
    fn new(data: &[i64], left: usize, mid: usize, right: usize) -> Self {
        Self {
            left_part: data[left..=mid].to_vec(),
            right_part: data[mid + 1..=right].to_vec(),
            left,
            mid,
            i: 0,
            j: 0,
            k: left,
        }
    }

    /// Write one element back. Returns `false` when both halves are drained.
    fn step(&mut self, data: &mut [i64], out: &mut VecDeque<StepEvent>) -> bool {
        let has_left = self.i < self.left_part.len();
        let has_right = self.j < self.right_part.len();

        let value = if has_left && has_right {
            let (a, b) = (self.left + self.i, self.mid + 1 + self.j);
            out.push_back(StepEvent::Compare(a, b));
            out.push_back(StepEvent::Revert(a, b));
            // Ties take the left head to keep the sort stable.
            if self.left_part[self.i] <= self.right_part[self.j] {
                self.i += 1;
                self.left_part[self.i - 1]
            } else {
                self.j += 1;
                self.right_part[self.j - 1]
            }
        } else if has_left {
            self.i += 1;
            self.left_part[self.i - 1]
        } else if has_right {
            self.j += 1;
            self.right_part[self.j - 1]
        } else {
            return false;
        };

        let k = self.k;
        data[k] = value;
        out.push_back(StepEvent::Overwrite { index: k, value });
        out.push_back(StepEvent::Revert(k, k));
        self.k += 1;
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Sorting,
    /// Marking every index, next one to mark.
    Marking(usize),
    Done,
}

/// Top-down merge sort over an explicit frame stack.
#[derive(Clone, Debug)]
pub(crate) struct MergeCursor {
    data: Vec<i64>,
    stack: Vec<Frame>,
    merging: Option<Merging>,
    phase: Phase,
}

impl MergeCursor {
    pub fn new(data: Vec<i64>) -> Self {
        let n = data.len();
        let (stack, phase) = if n > 0 {
            (vec![Frame::Sort { left: 0, right: n - 1 }], Phase::Sorting)
        } else {
            (Vec::new(), Phase::Done)
        };
        Self {
            data,
            stack,
            merging: None,
            phase,
        }
    }
}

impl Cursor for MergeCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        match self.phase {
            Phase::Sorting => {
                if let Some(merging) = self.merging.as_mut() {
                    if !merging.step(&mut self.data, out) {
                        self.merging = None;
                    }
                    return true;
                }
                match self.stack.pop() {
                    Some(Frame::Sort { left, right }) => {
                        if left < right {
                            let mid = (left + right) / 2;
                            // Reverse order: the left half is sorted first.
                            self.stack.push(Frame::Merge { left, mid, right });
                            self.stack.push(Frame::Sort { left: mid + 1, right });
                            self.stack.push(Frame::Sort { left, right: mid });
                        }
                    }
                    Some(Frame::Merge { left, mid, right }) => {
                        self.merging = Some(Merging::new(&self.data, left, mid, right));
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
