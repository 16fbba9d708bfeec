//! Distinct node.

use crate::accumulator::{Accumulation, Hashed, SeenSet, Strategy};
use crate::executor::Node;
use crate::plan::{Describe, Plan};
use crate::visitor::CursorSet;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::marker::PhantomData;
use qpipe_core::{NodeKind, OperatorKind};
use tracing::trace;

/// Distinct node - drops every element already seen in the current traversal.
///
/// The first occurrence wins, so for reference elements the address handed out is the
/// address of the first equal element upstream. Elements come out in first-seen order.
pub struct Distinct<N, S = Hashed> {
    upstream: N,
    strategy: PhantomData<S>,
}

impl<N, S> Distinct<N, S> {
    /// Creates a new distinct node.
    pub fn new(upstream: N) -> Self {
        Self {
            upstream,
            strategy: PhantomData,
        }
    }
}

impl<N: Clone, S> Clone for Distinct<N, S> {
    fn clone(&self) -> Self {
        Self::new(self.upstream.clone())
    }
}

impl<N: Describe, S: Accumulation> Describe for Distinct<N, S> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Distinct)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind())
            .with_detail(S::NAME)
            .with_child(self.upstream.describe())
    }
}

impl<'q, N, S> Node<'q> for Distinct<N, S>
where
    N: Node<'q>,
    N::Item: Clone,
    S: Strategy<N::Item> + 'q,
{
    type Item = N::Item;
    type Cursor = DistinctCursor<N::Cursor, S::Seen>;

    fn begin(&'q self) -> Self::Cursor {
        trace!(strategy = S::NAME, "distinct accumulator created");
        DistinctCursor::new(self.upstream.begin())
    }
}

/// Cursor of a distinct node.
///
/// The seen-set is reference counted: clones of the cursor share it until one of them
/// advances, which then takes its own copy.
pub struct DistinctCursor<C, A> {
    upstream: C,
    seen: Rc<A>,
}

impl<C, A: Default> DistinctCursor<C, A> {
    pub(crate) fn new(upstream: C) -> Self {
        Self {
            upstream,
            seen: Rc::new(A::default()),
        }
    }
}

impl<C, A> Iterator for DistinctCursor<C, A>
where
    C: Iterator,
    C::Item: Clone,
    A: SeenSet<C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        loop {
            let item = self.upstream.next()?;
            if Rc::make_mut(&mut self.seen).remember(item.clone()) {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

impl<C: Clone, A> Clone for DistinctCursor<C, A> {
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            seen: Rc::clone(&self.seen),
        }
    }
}

/// Deduplicates every operand of a cursor set on its own.
///
/// Used by Union and Intersect so that repeats inside one operand never count twice.
pub struct DistinctEach<C, A> {
    cursors: C,
    seen: Vec<Rc<A>>,
}

impl<C: CursorSet, A: Default> DistinctEach<C, A> {
    pub(crate) fn new(cursors: C) -> Self {
        Self {
            cursors,
            seen: (0..C::COUNT).map(|_| Rc::new(A::default())).collect(),
        }
    }
}

impl<C, A> CursorSet for DistinctEach<C, A>
where
    C: CursorSet,
    C::Item: Clone,
    A: SeenSet<C::Item>,
{
    type Item = C::Item;
    const COUNT: usize = C::COUNT;

    fn next_of(&mut self, operand: usize) -> Option<C::Item> {
        let seen = self.seen.get_mut(operand)?;
        loop {
            let item = self.cursors.next_of(operand)?;
            if Rc::make_mut(seen).remember(item.clone()) {
                return Some(item);
            }
        }
    }
}

impl<C: Clone, A> Clone for DistinctEach<C, A> {
    fn clone(&self) -> Self {
        Self {
            cursors: self.cursors.clone(),
            seen: self.seen.clone(),
        }
    }
}
