//! Concat node.

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use crate::visitor::{CursorSet, DescribeOperands, Operands, OperandsMut, Sequential};
use qpipe_core::{NodeKind, OperatorKind};

/// Concat node - every operand in full, one after another.
///
/// Keeps duplicates and the order inside each operand. Elements pass through untouched,
/// so a concat over mutable sources can be traversed mutably.
#[derive(Clone)]
pub struct Concat<Ops> {
    operands: Ops,
}

impl<Ops> Concat<Ops> {
    /// Creates a new concat node over a tuple of operand nodes.
    pub fn new(operands: Ops) -> Self {
        Self { operands }
    }
}

impl<Ops: DescribeOperands> Describe for Concat<Ops> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Concat)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind()).with_children(self.operands.describe_operands())
    }
}

impl<'q, Ops> Node<'q> for Concat<Ops>
where
    Ops: Operands<'q> + DescribeOperands,
{
    type Item = Ops::Item;
    type Cursor = ConcatCursor<Ops::Cursors>;

    fn begin(&'q self) -> Self::Cursor {
        ConcatCursor {
            visitor: Sequential::new(self.operands.begin_all()),
        }
    }
}

impl<'q, Ops> NodeMut<'q> for Concat<Ops>
where
    Ops: OperandsMut<'q> + DescribeOperands,
{
    type ItemMut = Ops::ItemMut;
    type CursorMut = ConcatCursor<Ops::CursorsMut>;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        ConcatCursor {
            visitor: Sequential::new(self.operands.begin_all_mut()),
        }
    }
}

/// Cursor of a concat node.
#[derive(Clone)]
pub struct ConcatCursor<C> {
    visitor: Sequential<C>,
}

impl<C: CursorSet> Iterator for ConcatCursor<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        self.visitor.next()
    }
}
