//! Intersect node.

use crate::accumulator::{Accumulation, CountMap, Hashed, Strategy};
use crate::executor::distinct::DistinctEach;
use crate::executor::Node;
use crate::plan::{Describe, Plan};
use crate::visitor::{CursorSet, DescribeOperands, Operands, RoundRobin};
use alloc::rc::Rc;
use core::marker::PhantomData;
use qpipe_core::{NodeKind, OperatorKind};
use tracing::trace;

/// Intersect node - every element present in all operands, once.
///
/// Each operand is deduplicated on its own before counting, so a count of N means the
/// element was seen in N different operands. An element is emitted the moment its count
/// reaches the number of operands.
pub struct Intersect<Ops, S = Hashed> {
    operands: Ops,
    strategy: PhantomData<S>,
}

impl<Ops, S> Intersect<Ops, S> {
    /// Creates a new intersect node over a tuple of operand nodes.
    pub fn new(operands: Ops) -> Self {
        Self {
            operands,
            strategy: PhantomData,
        }
    }
}

impl<Ops: Clone, S> Clone for Intersect<Ops, S> {
    fn clone(&self) -> Self {
        Self::new(self.operands.clone())
    }
}

impl<Ops: DescribeOperands, S: Accumulation> Describe for Intersect<Ops, S> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Intersect)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind())
            .with_detail(S::NAME)
            .with_children(self.operands.describe_operands())
    }
}

impl<'q, Ops, S> Node<'q> for Intersect<Ops, S>
where
    Ops: Operands<'q> + DescribeOperands,
    Ops::Item: Clone,
    S: Strategy<Ops::Item> + 'q,
{
    type Item = Ops::Item;
    type Cursor = IntersectCursor<Ops::Cursors, S::Seen, S::Counts>;

    fn begin(&'q self) -> Self::Cursor {
        trace!(strategy = S::NAME, "intersect accumulator created");
        IntersectCursor {
            operands: RoundRobin::new(DistinctEach::new(self.operands.begin_all())),
            counts: Rc::new(S::Counts::default()),
        }
    }
}

/// Cursor of an intersect node.
pub struct IntersectCursor<C, A, M> {
    operands: RoundRobin<DistinctEach<C, A>>,
    counts: Rc<M>,
}

impl<C, A, M> Iterator for IntersectCursor<C, A, M>
where
    C: CursorSet,
    C::Item: Clone,
    DistinctEach<C, A>: CursorSet<Item = C::Item>,
    M: CountMap<C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        loop {
            let item = self.operands.next()?;
            if Rc::make_mut(&mut self.counts).bump(item.clone()) == C::COUNT {
                return Some(item);
            }
        }
    }
}

impl<C: Clone, A, M> Clone for IntersectCursor<C, A, M> {
    fn clone(&self) -> Self {
        Self {
            operands: self.operands.clone(),
            counts: Rc::clone(&self.counts),
        }
    }
}
