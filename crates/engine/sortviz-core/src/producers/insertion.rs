use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Walking element `i` down towards its slot.
    Walk,
    /// Re-marking the sorted prefix `0..=i`.
    MarkPrefix,
    /// Final mark of the last index.
    Finish,
    Done,
}

#[derive(Clone, Debug)]
pub(crate) struct InsertionCursor {
    data: Vec<i64>,
    i: usize,
    j: usize,
    phase: Phase,
}

impl InsertionCursor {
    pub fn new(data: Vec<i64>) -> Self {
        Self {
            data,
            i: 1,
            j: 1,
            phase: Phase::Walk,
        }
    }
}

impl Cursor for InsertionCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        let n = self.data.len();
        match self.phase {
            Phase::Walk => {
                if self.i >= n {
                    self.phase = Phase::Finish;
                } else if self.j == 0 {
                    self.phase = Phase::MarkPrefix;
                } else {
                    let j = self.j;
                    out.push_back(StepEvent::Compare(j - 1, j));
                    if self.data[j - 1] > self.data[j] {
                        self.data.swap(j - 1, j);
                        out.push_back(StepEvent::Swap(j - 1, j));
                        out.push_back(StepEvent::Revert(j - 1, j));
                        self.j -= 1;
                    } else {
                        out.push_back(StepEvent::Revert(j - 1, j));
                        self.phase = Phase::MarkPrefix;
                    }
                }
                true
            }
            Phase::MarkPrefix => {
                // Idempotent: earlier prefixes are marked again on purpose.
                out.extend((0..=self.i).map(StepEvent::MarkSorted));
                self.i += 1;
                self.j = self.i;
                self.phase = Phase::Walk;
                true
            }
            Phase::Finish => {
                if n > 0 {
                    out.push_back(StepEvent::MarkSorted(n - 1));
                }
                self.phase = Phase::Done;
                true
            }
            Phase::Done => false,
        }
    }
}
