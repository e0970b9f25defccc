//! Step producers: one pull-based cursor per algorithm.
//!
//! Each cursor owns a working copy of the input and keeps its continuation
//! state explicitly (counters, and a frame stack where the textbook version
//! recurses). A call to [`Cursor::advance`] runs one micro-step of the
//! algorithm and queues the handful of events it produced; [`Steps`] drains
//! that queue lazily, so callers see a plain fused iterator.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::algorithm::Algorithm;
use crate::bars::{BarModel, NullSink};
use crate::step::StepEvent;

pub(crate) use bubble::BubbleCursor;
pub(crate) use heap::HeapCursor;
pub(crate) use insertion::InsertionCursor;
pub(crate) use merge::MergeCursor;
pub(crate) use quick::QuickCursor;
pub(crate) use selection::SelectionCursor;

pub(crate) trait Cursor {
    /// Run one micro-step, queueing its events into `out`.
    /// Returns `false` once the algorithm has nothing left to do.
    fn advance(&mut self, out: &mut VecDeque<StepEvent>) -> bool;
}

/// Lazy event stream over a cursor.
#[derive(Clone, Debug)]
pub(crate) struct Steps<C> {
    cursor: C,
    pending: VecDeque<StepEvent>,
    exhausted: bool,
}

impl<C: Cursor> Steps<C> {
    fn new(cursor: C) -> Self {
        Self {
            cursor,
            pending: VecDeque::new(),
            exhausted: false,
        }
    }
}

impl<C: Cursor> Iterator for Steps<C> {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.exhausted {
                return None;
            }
            if !self.cursor.advance(&mut self.pending) {
                self.exhausted = true;
            }
        }
    }
}

#[derive(Clone, Debug)]
enum Inner {
    Bubble(Steps<BubbleCursor>),
    Selection(Steps<SelectionCursor>),
    Insertion(Steps<InsertionCursor>),
    Merge(Steps<MergeCursor>),
    Quick(Steps<QuickCursor>),
    Heap(Steps<HeapCursor>),
}

/// The event source of one run.
///
/// Finite and non-restartable: once `next` returns `None` it keeps doing so.
#[derive(Clone, Debug)]
pub struct StepProducer {
    algorithm: Algorithm,
    inner: Inner,
}

impl StepProducer {
    pub fn new(algorithm: Algorithm, data: &[i64]) -> Self {
        let data = data.to_vec();
        let inner = match algorithm {
            Algorithm::Bubble => Inner::Bubble(Steps::new(BubbleCursor::new(data))),
            Algorithm::Selection => Inner::Selection(Steps::new(SelectionCursor::new(data))),
            Algorithm::Insertion => Inner::Insertion(Steps::new(InsertionCursor::new(data))),
            Algorithm::Merge => Inner::Merge(Steps::new(MergeCursor::new(data))),
            Algorithm::Quick => Inner::Quick(Steps::new(QuickCursor::new(data))),
            Algorithm::Heap => Inner::Heap(Steps::new(HeapCursor::new(data))),
        };
        Self { algorithm, inner }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl Iterator for StepProducer {
    type Item = StepEvent;

    fn next(&mut self) -> Option<StepEvent> {
        match &mut self.inner {
            Inner::Bubble(s) => s.next(),
            Inner::Selection(s) => s.next(),
            Inner::Insertion(s) => s.next(),
            Inner::Merge(s) => s.next(),
            Inner::Quick(s) => s.next(),
            Inner::Heap(s) => s.next(),
        }
    }
}

impl FusedIterator for StepProducer {}

/// Apply `events` to a fresh bar model built from `initial` and return it.
///
/// Headless counterpart of a full playback: no sink, no scheduling.
pub fn replay<I>(initial: &[i64], events: I) -> BarModel
where
    I: IntoIterator<Item = StepEvent>,
{
    let mut bars = BarModel::new(initial);
    let mut sink = NullSink;
    for event in events {
        bars.apply(event, &mut sink);
    }
    bars
}


#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn empty_input_produces_nothing() {
        for alg in Algorithm::ALL {
            assert!(drain(alg, &[]).is_empty(), "{alg}");
        }
    }

    #[test]
    fn single_element_is_marked_once() {
        for alg in Algorithm::ALL {
            let events = drain(alg, &[42]);
            assert_eq!(events, vec![StepEvent::MarkSorted(0)], "{alg}");
        }
    }

    #[test]
    fn producer_is_fused() {
        let mut p = StepProducer::new(Algorithm::Quick, &[2, 1]);
        while p.next().is_some() {}
        assert_eq!(p.next(), None);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn caller_data_is_untouched() {
        let data = vec![3, 1, 2];
        for alg in Algorithm::ALL {
            let producer = StepProducer::new(alg, &data);
            assert_eq!(producer.algorithm(), alg);
            let _ = producer.count();
            assert_eq!(data, vec![3, 1, 2]);
        }
    }

    #[test]
    fn every_algorithm_sorts_duplicates_and_negatives() {
        let data = [4, -1, 4, 0, -7, 9, 0, 3, 3, -1];
        let mut expected = data.to_vec();
        expected.sort();
        for alg in Algorithm::ALL {
            assert_eq!(sorted_by(alg, &data), expected, "{alg}");
        }
    }
}
