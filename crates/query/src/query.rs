//! Pipeline builder.
//!
//! A [`Query`] wraps the root node of a pipeline. Every operator method consumes the
//! query and returns a new one whose node owns the previous root, so building never
//! shares or copies upstream nodes. A query can be traversed any number of times.

use crate::accumulator::{Hashed, Ordered};
use crate::cursor::Cursor;
use crate::executor::{
    Concat, Distinct, Filter, FlatMap, Intersect, Join, Map, Node, NodeMut, Source, Union, Values,
};
use crate::plan::{Describe, Plan};
use crate::visitor::IntoOperands;
use core::marker::PhantomData;
use qpipe_core::{AccessMode, Constness, NodeKind, ReadOnly, ReadWrite, Sequence, Shape};
use tracing::trace;

/// A composable, re-traversable pipeline.
///
/// `C` is the query constness. A `ReadWrite` query over mutable sources can hand out
/// mutable references through [`Query::iter_mut`]; [`Query::freeze`] turns it into a
/// `ReadOnly` query, which has no mutable traversal at all:
///
/// ```compile_fail
/// let mut query = qpipe_query::from(vec![1, 2, 3]).freeze();
/// for x in query.iter_mut() {
///     *x += 1;
/// }
/// ```
pub struct Query<N, C = ReadWrite> {
    node: N,
    constness: PhantomData<C>,
}

/// Creates a query over a sequence. Owned sequences are moved in, borrowed ones stay
/// borrowed.
pub fn from<S: Sequence>(sequence: S) -> Query<Source<S>> {
    Query::new(Source::new(sequence))
}

/// Creates a query over values produced afresh on every traversal.
pub fn values<I: IntoIterator + Clone>(values: I) -> Query<Values<I>> {
    Query::new(Values::new(values))
}

/// Creates the union of 2 to 6 queries of the same constness.
pub fn union_all<T: IntoOperands>(operands: T) -> Query<Union<T::Nodes, Hashed>, T::Constness> {
    Query::new(Union::new(operands.into_operands()))
}

/// Like [`union_all`], with ordered accumulators.
pub fn union_all_ordered<T: IntoOperands>(
    operands: T,
) -> Query<Union<T::Nodes, Ordered>, T::Constness> {
    Query::new(Union::new(operands.into_operands()))
}

/// Creates the intersection of 2 to 6 queries of the same constness.
pub fn intersect_all<T: IntoOperands>(
    operands: T,
) -> Query<Intersect<T::Nodes, Hashed>, T::Constness> {
    Query::new(Intersect::new(operands.into_operands()))
}

/// Like [`intersect_all`], with ordered accumulators.
pub fn intersect_all_ordered<T: IntoOperands>(
    operands: T,
) -> Query<Intersect<T::Nodes, Ordered>, T::Constness> {
    Query::new(Intersect::new(operands.into_operands()))
}

/// Concatenates 2 to 6 queries of the same constness.
pub fn concat_all<T: IntoOperands>(operands: T) -> Query<Concat<T::Nodes>, T::Constness> {
    Query::new(Concat::new(operands.into_operands()))
}

impl<N, C: Constness> Query<N, C> {
    /// Wraps a node.
    pub fn new(node: N) -> Self {
        Self {
            node,
            constness: PhantomData,
        }
    }

    /// Projects every element through `selector`.
    pub fn map<F>(self, selector: F) -> Query<Map<N, F>, C> {
        Query::new(Map::new(self.node, selector))
    }

    /// Keeps the elements `predicate` accepts.
    pub fn filter<P>(self, predicate: P) -> Query<Filter<N, P>, C> {
        Query::new(Filter::new(self.node, predicate))
    }

    /// Replaces every element by the elements of the sequence `producer` returns for it.
    pub fn flat_map<F>(self, producer: F) -> Query<FlatMap<N, F>, C> {
        Query::new(FlatMap::new(self.node, producer))
    }

    /// Nested-loop equi-join with `inner`.
    ///
    /// For every element of this query, `inner` is traversed from the start; each inner
    /// element whose key equals the outer key yields `result(outer, inner)`. The outer
    /// element is cloned for each match.
    pub fn join<I, C2, KO, KI, R>(
        self,
        inner: Query<I, C2>,
        outer_key: KO,
        inner_key: KI,
        result: R,
    ) -> Query<Join<N, I, KO, KI, R>, C> {
        Query::new(Join::new(self.node, inner.node, outer_key, inner_key, result))
    }

    /// Drops repeated elements, hashing them.
    pub fn distinct(self) -> Query<Distinct<N, Hashed>, C> {
        Query::new(Distinct::new(self.node))
    }

    /// Drops repeated elements, ordering them.
    pub fn distinct_ordered(self) -> Query<Distinct<N, Ordered>, C> {
        Query::new(Distinct::new(self.node))
    }

    /// Set union with `other`, hashing elements.
    pub fn union<M>(self, other: Query<M, C>) -> Query<Union<(N, M), Hashed>, C> {
        Query::new(Union::new((self.node, other.node)))
    }

    /// Set union with `other`, ordering elements.
    pub fn union_ordered<M>(self, other: Query<M, C>) -> Query<Union<(N, M), Ordered>, C> {
        Query::new(Union::new((self.node, other.node)))
    }

    /// Set intersection with `other`, hashing elements.
    pub fn intersect<M>(self, other: Query<M, C>) -> Query<Intersect<(N, M), Hashed>, C> {
        Query::new(Intersect::new((self.node, other.node)))
    }

    /// Set intersection with `other`, ordering elements.
    pub fn intersect_ordered<M>(
        self,
        other: Query<M, C>,
    ) -> Query<Intersect<(N, M), Ordered>, C> {
        Query::new(Intersect::new((self.node, other.node)))
    }

    /// Appends `other`.
    pub fn concat<M>(self, other: Query<M, C>) -> Query<Concat<(N, M)>, C> {
        Query::new(Concat::new((self.node, other.node)))
    }

    /// Narrows the query to read-only access. There is no way back.
    pub fn freeze(self) -> Query<N, ReadOnly> {
        Query::new(self.node)
    }

    pub fn is_frozen(&self) -> bool {
        C::FROZEN
    }

    /// Returns the root node.
    pub fn node(&self) -> &N {
        &self.node
    }

    pub(crate) fn into_node(self) -> N {
        self.node
    }
}

impl<N: Describe, C: Constness> Query<N, C> {
    /// Returns the kind of the root node.
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Describes the pipeline, root first.
    pub fn explain(&self) -> Plan {
        self.node.describe()
    }

    /// Opens a traversal through the cursor protocol.
    pub fn begin<'q>(&'q self) -> Cursor<N::Cursor>
    where
        N: Node<'q>,
    {
        trace!(node = %self.node.kind(), frozen = C::FROZEN, "traversal opened");
        Cursor::new(self.node.begin(), self.node.kind())
    }

    /// Opens a traversal as a plain iterator.
    pub fn iter<'q>(&'q self) -> N::Cursor
    where
        N: Node<'q>,
    {
        trace!(node = %self.node.kind(), frozen = C::FROZEN, "traversal opened");
        self.node.begin()
    }

    /// Returns how the elements of a shared traversal may be accessed.
    pub fn access_mode<'q>(&'q self) -> AccessMode
    where
        N: Node<'q>,
        N::Item: Shape,
    {
        AccessMode::transform(self.kind().origin(), <N::Item as Shape>::MODE, C::FROZEN)
    }
}

impl<N: Describe> Query<N, ReadWrite> {
    /// Opens an exclusive traversal as a plain iterator.
    pub fn iter_mut<'q>(&'q mut self) -> N::CursorMut
    where
        N: NodeMut<'q>,
    {
        trace!(node = %self.node.kind(), "mutable traversal opened");
        self.node.begin_mut()
    }

    /// Opens an exclusive traversal through the cursor protocol.
    pub fn begin_mut<'q>(&'q mut self) -> Cursor<N::CursorMut>
    where
        N: NodeMut<'q>,
    {
        let kind = self.node.kind();
        trace!(node = %kind, "mutable traversal opened");
        Cursor::new(self.node.begin_mut(), kind)
    }

    /// Returns how the elements of an exclusive traversal may be accessed.
    pub fn access_mode_mut<'q>(&'q self) -> AccessMode
    where
        N: NodeMut<'q>,
        N::ItemMut: Shape,
    {
        AccessMode::transform(self.kind().origin(), <N::ItemMut as Shape>::MODE, false)
    }
}

impl<N: Clone, C> Clone for Query<N, C> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            constness: PhantomData,
        }
    }
}

impl<'q, N: Node<'q>, C: Constness> IntoIterator for &'q Query<N, C> {
    type Item = N::Item;
    type IntoIter = N::Cursor;

    fn into_iter(self) -> N::Cursor {
        self.iter()
    }
}

impl<'q, N: NodeMut<'q>> IntoIterator for &'q mut Query<N, ReadWrite> {
    type Item = N::ItemMut;
    type IntoIter = N::CursorMut;

    fn into_iter(self) -> N::CursorMut {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use qpipe_core::OperatorKind;

    #[test]
    fn test_build_and_iterate() {
        let query = from(vec![1, 2, 3, 4])
            .filter(|x: &&i32| **x % 2 == 0)
            .map(|x: &i32| x * 10);

        let result: Vec<i32> = query.iter().collect();
        assert_eq!(result, vec![20, 40]);
        assert_eq!(query.iter().collect::<Vec<_>>(), result);
        assert_eq!(query.kind(), NodeKind::Operator(OperatorKind::Map));
    }

    #[test]
    fn test_for_loop_over_query() {
        let query = values(1..4).concat(values(7..8));
        let mut total = 0;
        for x in &query {
            total += x;
        }
        assert_eq!(total, 13);
    }

    #[test]
    fn test_iter_mut() {
        let mut data = vec![1, 2, 3];
        let mut query = from(&mut data).filter(|x: &&mut i32| **x > 1);
        for x in &mut query {
            *x = 0;
        }
        assert_eq!(data, vec![1, 0, 0]);
    }

    #[test]
    fn test_freeze() {
        let query = from(vec![1, 2]);
        assert!(!query.is_frozen());
        assert_eq!(query.access_mode(), AccessMode::ImmutableReference);
        assert_eq!(query.access_mode_mut(), AccessMode::MutableReference);

        let frozen = query.freeze();
        assert!(frozen.is_frozen());
        assert_eq!(frozen.iter().count(), 2);
    }

    #[test]
    fn test_explain() {
        let data = [3];
        let query = from(vec![1, 2]).union(from(&data[..])).distinct_ordered();
        let plan = query.explain();
        assert_eq!(
            plan.to_string(),
            "Distinct [ordered]\n  Union [hashed]\n    Source (owned, mutable)\n    Source (borrowed, read-only)\n"
        );
        assert_eq!(query.iter().count(), 3);
    }

    #[test]
    fn test_cursor_protocol_through_query() {
        let query = from(vec![5, 6]);
        let mut cursor = query.begin();
        assert_eq!(**cursor.get(), 5);
        cursor.advance();
        assert_eq!(**cursor.get(), 6);
        cursor.advance();
        assert!(cursor.is_end());
        assert_eq!(cursor.node(), query.kind());
    }
}
