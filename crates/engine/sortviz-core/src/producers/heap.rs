use std::collections::VecDeque;

use super::Cursor;
use crate::step::StepEvent;

/// Sift-down in progress over `data[..size]`, currently at `root`.
#[derive(Copy, Clone, Debug)]
struct Sift {
    size: usize,
    root: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Heap construction; next root to sift, counting down to 0.
    Build(Option<usize>),
    /// Extraction; last unsorted slot.
    Extract(usize),
    Finish,
    Done,
}

#[derive(Clone, Debug)]
pub(crate) struct HeapCursor {
    data: Vec<i64>,
    sift: Option<Sift>,
    phase: Phase,
}

impl HeapCursor {
    pub fn new(data: Vec<i64>) -> Self {
        let first_root = (data.len() / 2).checked_sub(1);
        Self {
            data,
            sift: None,
            phase: Phase::Build(first_root),
        }
    }

    /// One level of sift-down. Returns the next level, if the root moved.
    fn sift_level(&mut self, sift: Sift, out: &mut VecDeque<StepEvent>) -> Option<Sift> {
        let Sift { size, root } = sift;
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < size {
            out.push_back(StepEvent::Compare(root, left));
            if self.data[left] > self.data[largest] {
                largest = left;
            }
            out.push_back(StepEvent::Revert(root, left));
        }
        if right < size {
            let against = largest;
            out.push_back(StepEvent::Compare(against, right));
            if self.data[right] > self.data[largest] {
                largest = right;
            }
            out.push_back(StepEvent::Revert(against, right));
        }

        if largest == root {
            return None;
        }
        self.data.swap(root, largest);
        out.push_back(StepEvent::Swap(root, largest));
        out.push_back(StepEvent::Revert(root, largest));
        Some(Sift { size, root: largest })
    }
}

impl Cursor for HeapCursor {
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool {
        if let Some(sift) = self.sift.take() {
            self.sift = self.sift_level(sift, out);
            return true;
        }

        let n = self.data.len();
        match self.phase {
            Phase::Build(Some(root)) => {
                self.sift = Some(Sift { size: n, root });
                self.phase = Phase::Build(root.checked_sub(1));
            }
            Phase::Build(None) => self.phase = Phase::Extract(n.saturating_sub(1)),
            Phase::Extract(end) if end >= 1 => {
                self.data.swap(0, end);
                out.push_back(StepEvent::Swap(0, end));
                out.push_back(StepEvent::MarkSorted(end));
                out.push_back(StepEvent::Revert(0, end));
                self.sift = Some(Sift { size: end, root: 0 });
                self.phase = Phase::Extract(end - 1);
            }
            Phase::Extract(_) => self.phase = Phase::Finish,
            Phase::Finish => {
                if n > 0 {
                    out.push_back(StepEvent::MarkSorted(0));
                }
                self.phase = Phase::Done;
            }
            Phase::Done => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use crate::algorithm::Algorithm;
    use crate::step::StepEvent::*;

    #[test]
    fn three_elements_exact_stream() {
        // [1, 3, 2]: build sifts root 0 (3 wins), then two extractions.
        assert_eq!(
            drain(Algorithm::Heap, &[1, 3, 2]),
            vec![
                Compare(0, 1),
                Revert(0, 1),
                Compare(1, 2),
                Revert(1, 2),
                Swap(0, 1),
                Revert(0, 1),
                Swap(0, 2),
                MarkSorted(2),
                Revert(0, 2),
                Compare(0, 1),
                Revert(0, 1),
                Swap(0, 1),
                MarkSorted(1),
                Revert(0, 1),
                MarkSorted(0),
            ]
        );
    }

    #[test]
    fn marks_every_index_once() {
        let events = drain(Algorithm::Heap, &[6, 1, 9, 4, 4, 0, 7]);
        let mut m = marks(&events);
        m.sort();
        assert_eq!(m, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn sorts_reference_input() {
        assert_eq!(sorted_by(Algorithm::Heap, &[5, 3, 4, 1, 2]), vec![1, 2, 3, 4, 5]);
    }
}
