//! Equi-join node.
//!
//! Joins are always nested loops: the inner node is traversed again from its start for
//! every outer element, so it must be re-iterable (every node is).

mod nested;

pub use nested::NestedLoopCursor;

use crate::executor::Node;
use crate::plan::{Describe, Plan};
use qpipe_core::{NodeKind, OperatorKind};

/// Join node - pairs outer and inner elements with equal keys.
///
/// Results are produced outer-major, inner-minor: all matches of the first outer element
/// come first, in inner order.
///
/// The result selector takes the outer element by value, so it is cloned once per match.
/// Outer elements that are references cost nothing to clone; owned outer elements (from
/// `values` or a `map`) are copied for every inner element they match.
#[derive(Clone)]
pub struct Join<O, I, KO, KI, R> {
    outer: O,
    inner: I,
    outer_key: KO,
    inner_key: KI,
    result: R,
}

impl<O, I, KO, KI, R> Join<O, I, KO, KI, R> {
    /// Creates a new join node.
    pub fn new(outer: O, inner: I, outer_key: KO, inner_key: KI, result: R) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
        }
    }
}

impl<O: Describe, I: Describe, KO, KI, R> Describe for Join<O, I, KO, KI, R> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Join)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind())
            .with_detail("nested loop")
            .with_child(self.outer.describe())
            .with_child(self.inner.describe())
    }
}

impl<'q, O, I, KO, KI, R, K, U> Node<'q> for Join<O, I, KO, KI, R>
where
    O: Node<'q> + 'q,
    I: Node<'q> + 'q,
    O::Item: Clone,
    KO: Fn(&O::Item) -> K + 'q,
    KI: Fn(&I::Item) -> K + 'q,
    K: PartialEq,
    R: Fn(O::Item, I::Item) -> U + 'q,
{
    type Item = U;
    type Cursor = NestedLoopCursor<'q, O, I, KO, KI, R, K>;

    fn begin(&'q self) -> Self::Cursor {
        NestedLoopCursor::new(self)
    }
}
