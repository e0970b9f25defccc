use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

/// Bubble sort with the early exit on a swap-free pass.
#[derive(Clone, Debug)]
pub(crate) struct BubbleCursor {
    data: Vec<i64>,
    pass: usize,
    j: usize,
    swapped: bool,
    done: bool,
}

impl BubbleCursor {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data,
            pass: 0,
            j: 0,
            swapped: false,
            done: false,
        }
    }
}

impl Cursor for BubbleCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        let n = self.data.len();
        if self.done || self.pass >= n {
            self.done = true;
            return false;
        }
        // Unsorted prefix of this pass is 0..=last.
        let last = n - self.pass - 1;

        if self.j < last {
            let j = self.j;
            out.push_back(StepEvent::Compare(j, j + 1));
            if self.data[j] > self.data[j + 1] {
                self.data.swap(j, j + 1);
                self.swapped = true;
                out.push_back(StepEvent::Swap(j, j + 1));
            }
            out.push_back(StepEvent::Revert(j, j + 1));
            self.j += 1;
            return true;
        }

        out.push_back(StepEvent::MarkSorted(last));
        if !self.swapped {
            out.extend((0..last).map(StepEvent::MarkSorted));
            self.done = true;
            return true;
        }
        self.pass += 1;
        self.j = 0;
        self.swapped = false;
        true
    }
}
