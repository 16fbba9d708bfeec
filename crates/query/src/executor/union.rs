//! Union node.

use crate::accumulator::{Accumulation, Hashed, SeenSet, Strategy};
use crate::executor::distinct::DistinctEach;
use crate::executor::Node;
use crate::plan::{Describe, Plan};
use crate::visitor::{CursorSet, DescribeOperands, Operands, RoundRobin};
use alloc::rc::Rc;
use core::marker::PhantomData;
use qpipe_core::{NodeKind, OperatorKind};
use tracing::trace;

/// Union node - every element present in any operand, once.
///
/// Operands are pulled in rotation, one element per step, so no operand has to be
/// drained before results appear. The output order is the rotation order.
pub struct Union<Ops, S = Hashed> {
    operands: Ops,
    strategy: PhantomData<S>,
}

impl<Ops, S> Union<Ops, S> {
    /// Creates a new union node over a tuple of operand nodes.
    pub fn new(operands: Ops) -> Self {
        Self {
            operands,
            strategy: PhantomData,
        }
    }
}

impl<Ops: Clone, S> Clone for Union<Ops, S> {
    fn clone(&self) -> Self {
        Self::new(self.operands.clone())
    }
}

impl<Ops: DescribeOperands, S: Accumulation> Describe for Union<Ops, S> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Union)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind())
            .with_detail(S::NAME)
            .with_children(self.operands.describe_operands())
    }
}

impl<'q, Ops, S> Node<'q> for Union<Ops, S>
where
    Ops: Operands<'q> + DescribeOperands,
    Ops::Item: Clone,
    S: Strategy<Ops::Item> + 'q,
{
    type Item = Ops::Item;
    type Cursor = UnionCursor<Ops::Cursors, S::Seen>;

    fn begin(&'q self) -> Self::Cursor {
        trace!(strategy = S::NAME, "union accumulator created");
        UnionCursor {
            operands: RoundRobin::new(DistinctEach::new(self.operands.begin_all())),
            seen: Rc::new(S::Seen::default()),
        }
    }
}

/// Cursor of a union node.
pub struct UnionCursor<C, A> {
    operands: RoundRobin<DistinctEach<C, A>>,
    seen: Rc<A>,
}

impl<C, A> Iterator for UnionCursor<C, A>
where
    C: CursorSet,
    C::Item: Clone,
    A: SeenSet<C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        loop {
            let item = self.operands.next()?;
            if Rc::make_mut(&mut self.seen).remember(item.clone()) {
                return Some(item);
            }
        }
    }
}

impl<C: Clone, A> Clone for UnionCursor<C, A> {
    fn clone(&self) -> Self {
        Self {
            operands: self.operands.clone(),
            seen: Rc::clone(&self.seen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::Ordered;
    use crate::executor::{Source, Values};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_union() {
        let node: Union<_> = Union::new((Source::new(vec![1, 2, 3]), Source::new(vec![2, 3, 4])));
        let mut result: Vec<i32> = node.begin().copied().collect();
        result.sort();
        assert_eq!(result, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_union_rotation_order() {
        let node: Union<_> = Union::new((
            Values::new(vec![1, 1, 5]),
            Values::new(vec![5, 6]),
            Values::new(vec![7]),
        ));
        let result: Vec<i32> = node.begin().collect();
        assert_eq!(result, vec![1, 5, 7, 6]);
    }

    #[test]
    fn test_union_all_empty() {
        let node: Union<_, Ordered> = Union::new((
            Values::new(0..0),
            Values::new(0..0),
            Values::new(0..0),
        ));
        assert_eq!(node.begin().count(), 0);
        assert_eq!(node.begin().count(), 0);
        assert_eq!(node.describe().children().len(), 3);
    }
}
