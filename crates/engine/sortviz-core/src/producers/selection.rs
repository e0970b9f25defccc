use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

#[derive(Clone, Debug)]
pub(crate) struct SelectionCursor {
    data: Vec<i64>,
    i: usize,
    j: usize,
    min: usize,
}

impl SelectionCursor {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data,
            i: 0,
            j: 1,
            min: 0,
        }
    }
}

impl Cursor for SelectionCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        let n = self.data.len();
        if self.i >= n {
            return false;
        }

        if self.j < n {
            let (j, previous) = (self.j, self.min);
            out.push_back(StepEvent::Compare(previous, j));
            if self.data[j] < self.data[previous] {
                self.min = j;
            }
            // Revert pairs with the minimum that was highlighted, not the new one.
            out.push_back(StepEvent::Revert(previous, j));
            self.j += 1;
            return true;
        }

        let (i, min) = (self.i, self.min);
        if min != i {
            self.data.swap(i, min);
            out.push_back(StepEvent::Swap(i, min));
            out.push_back(StepEvent::Revert(i, min));
        }
        out.push_back(StepEvent::MarkSorted(i));
        self.i += 1;
        self.j = self.i + 1;
        self.min = self.i;
        true
    }
}
