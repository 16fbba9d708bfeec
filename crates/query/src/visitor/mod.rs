//! Multi-source visitors.
//!
//! Union, Intersect and Concat pull from N operand cursors. The operands form a tuple of
//! nodes; opening them yields a [`CursorSet`], which a visitor walks either one operand
//! after another ([`Sequential`]) or one element per operand in rotation ([`RoundRobin`]).

mod round_robin;
mod sequential;

pub use round_robin::RoundRobin;
pub use sequential::Sequential;

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use crate::query::Query;
use alloc::vec;
use alloc::vec::Vec;
use qpipe_core::Constness;

/// A fixed set of operand cursors with a common element type.
pub trait CursorSet {
    type Item;

    /// The number of operands.
    const COUNT: usize;

    /// Pulls the next element of one operand. Operands past `COUNT` yield nothing.
    fn next_of(&mut self, operand: usize) -> Option<Self::Item>;
}

/// A tuple of nodes that can be opened together for shared traversal.
pub trait Operands<'q> {
    type Item;
    type Cursors: CursorSet<Item = Self::Item>;

    fn begin_all(&'q self) -> Self::Cursors;
}

/// A tuple of nodes that can be opened together for exclusive traversal.
pub trait OperandsMut<'q> {
    type ItemMut;
    type CursorsMut: CursorSet<Item = Self::ItemMut>;

    fn begin_all_mut(&'q mut self) -> Self::CursorsMut;
}

/// Describes every operand of a tuple.
pub trait DescribeOperands {
    fn describe_operands(&self) -> Vec<Plan>;
}

/// A tuple of pipeline values that can become the operands of a multi-source node.
///
/// All values must share one constness; the result keeps it.
pub trait IntoOperands {
    type Nodes;
    type Constness: Constness;

    fn into_operands(self) -> Self::Nodes;
}

macro_rules! tuple_operands {
    ($count:expr; $head_index:tt => $head:ident $(, $index:tt => $node:ident)+) => {
        impl<$head: Iterator, $($node: Iterator<Item = <$head as Iterator>::Item>),+> CursorSet
            for ($head, $($node,)+)
        {
            type Item = <$head as Iterator>::Item;
            const COUNT: usize = $count;

            #[inline]
            fn next_of(&mut self, operand: usize) -> Option<Self::Item> {
                match operand {
                    $head_index => self.$head_index.next(),
                    $($index => self.$index.next(),)+
                    _ => None,
                }
            }
        }

        impl<'q, $head: Node<'q>, $($node: Node<'q, Item = <$head as Node<'q>>::Item>),+> Operands<'q>
            for ($head, $($node,)+)
        {
            type Item = <$head as Node<'q>>::Item;
            type Cursors = (<$head as Node<'q>>::Cursor, $(<$node as Node<'q>>::Cursor,)+);

            fn begin_all(&'q self) -> Self::Cursors {
                (self.$head_index.begin(), $(self.$index.begin(),)+)
            }
        }

        impl<'q, $head: NodeMut<'q>, $($node: NodeMut<'q, ItemMut = <$head as NodeMut<'q>>::ItemMut>),+>
            OperandsMut<'q> for ($head, $($node,)+)
        {
            type ItemMut = <$head as NodeMut<'q>>::ItemMut;
            type CursorsMut = (<$head as NodeMut<'q>>::CursorMut, $(<$node as NodeMut<'q>>::CursorMut,)+);

            fn begin_all_mut(&'q mut self) -> Self::CursorsMut {
                (self.$head_index.begin_mut(), $(self.$index.begin_mut(),)+)
            }
        }

        impl<$head: Describe, $($node: Describe),+> DescribeOperands for ($head, $($node,)+) {
            fn describe_operands(&self) -> Vec<Plan> {
                vec![self.$head_index.describe(), $(self.$index.describe()),+]
            }
        }

        impl<K: Constness, $head, $($node),+> IntoOperands for (Query<$head, K>, $(Query<$node, K>,)+) {
            type Nodes = ($head, $($node,)+);
            type Constness = K;

            fn into_operands(self) -> Self::Nodes {
                (self.$head_index.into_node(), $(self.$index.into_node(),)+)
            }
        }
    };
}

tuple_operands!(2; 0 => A, 1 => B);
tuple_operands!(3; 0 => A, 1 => B, 2 => C);
tuple_operands!(4; 0 => A, 1 => B, 2 => C, 3 => D);
tuple_operands!(5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
tuple_operands!(6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
