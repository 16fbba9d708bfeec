//! Filter node.

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use qpipe_core::{NodeKind, OperatorKind};

/// Filter node - keeps the upstream elements a predicate accepts.
///
/// Elements pass through untouched. The predicate is evaluated again on every traversal,
/// so it may read state outside the pipeline.
#[derive(Clone)]
pub struct Filter<N, P> {
    upstream: N,
    predicate: P,
}

impl<N, P> Filter<N, P> {
    /// Creates a new filter node.
    pub fn new(upstream: N, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<N: Describe, P> Describe for Filter<N, P> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Filter)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind()).with_child(self.upstream.describe())
    }
}

impl<'q, N, P> Node<'q> for Filter<N, P>
where
    N: Node<'q>,
    P: Fn(&N::Item) -> bool + 'q,
{
    type Item = N::Item;
    type Cursor = FilterCursor<'q, N::Cursor, P>;

    fn begin(&'q self) -> Self::Cursor {
        FilterCursor {
            upstream: self.upstream.begin(),
            predicate: &self.predicate,
        }
    }
}

impl<'q, N, P> NodeMut<'q> for Filter<N, P>
where
    N: NodeMut<'q>,
    P: Fn(&N::ItemMut) -> bool + 'q,
{
    type ItemMut = N::ItemMut;
    type CursorMut = FilterCursor<'q, N::CursorMut, P>;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        FilterCursor {
            upstream: self.upstream.begin_mut(),
            predicate: &self.predicate,
        }
    }
}

/// Cursor of a filter node.
pub struct FilterCursor<'q, C, P> {
    upstream: C,
    predicate: &'q P,
}

impl<'q, C, P> Iterator for FilterCursor<'q, C, P>
where
    C: Iterator,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        let predicate = self.predicate;
        self.upstream.find(|item| predicate(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

impl<'q, C: Clone, P> Clone for FilterCursor<'q, C, P> {
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            predicate: self.predicate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Source;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    #[test]
    fn test_filter() {
        let node = Filter::new(Source::new(vec![10, 20, 30]), |x: &&i32| **x > 15);
        let result: Vec<&i32> = node.begin().collect();
        assert_eq!(result, vec![&20, &30]);
    }

    #[test]
    fn test_filter_all_rejected() {
        let node = Filter::new(Source::new(vec![1, 2, 3]), |_: &&i32| false);
        assert!(node.begin().next().is_none());
    }

    #[test]
    fn test_filter_reads_external_state() {
        let threshold = Cell::new(1);
        let node = Filter::new(Source::new(vec![1, 2, 3]), |x: &&i32| **x > threshold.get());

        assert_eq!(node.begin().count(), 2);
        threshold.set(2);
        assert_eq!(node.begin().count(), 1);
    }

    #[test]
    fn test_filter_mut() {
        let mut data = vec![1, 2, 3, 4];
        let mut node = Filter::new(Source::new(&mut data), |x: &&mut i32| **x % 2 == 0);
        for item in node.begin_mut() {
            *item = 0;
        }
        assert_eq!(data, vec![1, 0, 3, 0]);
    }
}
