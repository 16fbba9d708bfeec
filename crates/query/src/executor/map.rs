//! Map node.

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use qpipe_core::{NodeKind, OperatorKind};

/// Map node - projects every upstream element through a selector.
#[derive(Clone)]
pub struct Map<N, F> {
    upstream: N,
    selector: F,
}

impl<N, F> Map<N, F> {
    /// Creates a new map node.
    pub fn new(upstream: N, selector: F) -> Self {
        Self { upstream, selector }
    }

    pub fn upstream(&self) -> &N {
        &self.upstream
    }
}

impl<N: Describe, F> Describe for Map<N, F> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::Map)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind()).with_child(self.upstream.describe())
    }
}

impl<'q, N, F, U> Node<'q> for Map<N, F>
where
    N: Node<'q>,
    F: Fn(N::Item) -> U + 'q,
{
    type Item = U;
    type Cursor = MapCursor<'q, N::Cursor, F>;

    fn begin(&'q self) -> Self::Cursor {
        MapCursor {
            upstream: self.upstream.begin(),
            selector: &self.selector,
        }
    }
}

impl<'q, N, F, U> NodeMut<'q> for Map<N, F>
where
    N: NodeMut<'q>,
    F: Fn(N::ItemMut) -> U + 'q,
{
    type ItemMut = U;
    type CursorMut = MapCursor<'q, N::CursorMut, F>;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        MapCursor {
            upstream: self.upstream.begin_mut(),
            selector: &self.selector,
        }
    }
}

/// Cursor of a map node.
pub struct MapCursor<'q, C, F> {
    upstream: C,
    selector: &'q F,
}

impl<'q, C, F, U> Iterator for MapCursor<'q, C, F>
where
    C: Iterator,
    F: Fn(C::Item) -> U,
{
    type Item = U;

    #[inline]
    fn next(&mut self) -> Option<U> {
        self.upstream.next().map(self.selector)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

impl<'q, C: Clone, F> Clone for MapCursor<'q, C, F> {
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            selector: self.selector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Source;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_map() {
        let node = Map::new(Source::new(vec![1, 2, 3]), |x: &i32| x * 2);
        let result: Vec<i32> = node.begin().collect();
        assert_eq!(result, vec![2, 4, 6]);
    }

    #[test]
    fn test_map_field_reference() {
        fn name(pair: &(u32, String)) -> &String {
            &pair.1
        }

        let node = Map::new(Source::new(vec![(1, String::from("a"))]), name);
        let first = node.begin().next().unwrap();
        assert!(core::ptr::eq(first, &node.upstream().sequence()[0].1));
    }

    #[test]
    fn test_map_mut() {
        fn first(pair: &mut (i32, i32)) -> &mut i32 {
            &mut pair.0
        }

        let mut data = vec![(1, 1), (2, 2)];
        let mut node = Map::new(Source::new(&mut data), first);
        for value in node.begin_mut() {
            *value += 100;
        }
        assert_eq!(data, vec![(101, 1), (102, 2)]);
    }

    #[test]
    fn test_map_cursor_clone() {
        let node = Map::new(Source::new(vec![1, 2, 3]), |x: &i32| x + 1);
        let mut cursor = node.begin();
        cursor.next();
        let copy = cursor.clone();
        assert_eq!(cursor.collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(copy.collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(node.kind(), NodeKind::Operator(OperatorKind::Map));
    }
}
