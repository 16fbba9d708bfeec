//! Nested loop join cursor.

use super::Join;
use crate::executor::Node;

/// Cursor of a join node.
///
/// Holds the outer cursor and, for the current outer element, its key and a fresh inner
/// cursor. When the inner cursor runs out the next outer element is pulled and the inner
/// node is opened again.
pub struct NestedLoopCursor<'q, O, I, KO, KI, R, K>
where
    O: Node<'q>,
    I: Node<'q>,
{
    join: &'q Join<O, I, KO, KI, R>,
    outer: O::Cursor,
    current: Option<(O::Item, K, I::Cursor)>,
}

impl<'q, O, I, KO, KI, R, K> NestedLoopCursor<'q, O, I, KO, KI, R, K>
where
    O: Node<'q>,
    I: Node<'q>,
{
    pub(super) fn new(join: &'q Join<O, I, KO, KI, R>) -> Self {
        Self {
            join,
            outer: join.outer.begin(),
            current: None,
        }
    }
}

impl<'q, O, I, KO, KI, R, K, U> Iterator for NestedLoopCursor<'q, O, I, KO, KI, R, K>
where
    O: Node<'q>,
    I: Node<'q>,
    O::Item: Clone,
    KO: Fn(&O::Item) -> K,
    KI: Fn(&I::Item) -> K,
    K: PartialEq,
    R: Fn(O::Item, I::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let join = self.join;
        loop {
            if let Some((outer_item, key, inner)) = &mut self.current {
                for inner_item in inner.by_ref() {
                    if (join.inner_key)(&inner_item) == *key {
                        return Some((join.result)(outer_item.clone(), inner_item));
                    }
                }
            }

            let outer_item = self.outer.next()?;
            let key = (join.outer_key)(&outer_item);
            self.current = Some((outer_item, key, join.inner.begin()));
        }
    }
}

impl<'q, O, I, KO, KI, R, K> Clone for NestedLoopCursor<'q, O, I, KO, KI, R, K>
where
    O: Node<'q>,
    I: Node<'q>,
    O::Cursor: Clone,
    I::Cursor: Clone,
    O::Item: Clone,
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            join: self.join,
            outer: self.outer.clone(),
            current: self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{Source, Values};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    #[derive(Debug)]
    struct Counted {
        key: i32,
        clones: Rc<Cell<usize>>,
    }

    impl Clone for Counted {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                key: self.key,
                clones: Rc::clone(&self.clones),
            }
        }
    }

    #[test]
    fn test_inner_reopened_per_outer_element() {
        let inner_keys = Cell::new(0);
        let node = Join::new(
            Source::new(vec![1, 2, 3]),
            Source::new(vec![3, 2, 1, 0]),
            |x: &&i32| **x,
            |x: &&i32| {
                inner_keys.set(inner_keys.get() + 1);
                **x
            },
            |a: &i32, b: &i32| a * 10 + b,
        );

        let result: Vec<i32> = node.begin().collect();
        assert_eq!(result, vec![11, 22, 33]);
        assert_eq!(inner_keys.get(), 12);
    }

    #[test]
    fn test_cursor_clone_advances_independently() {
        let node = Join::new(
            Source::new(vec![1, 1]),
            Source::new(vec![1, 1]),
            |x: &&i32| **x,
            |x: &&i32| **x,
            |_: &i32, _: &i32| (),
        );

        let mut cursor = node.begin();
        assert!(cursor.next().is_some());
        let copy = cursor.clone();
        assert_eq!(cursor.count(), 3);
        assert_eq!(copy.count(), 3);
    }

    #[test]
    fn test_empty_outer() {
        let node = Join::new(
            Source::new(Vec::<i32>::new()),
            Source::new(vec![1]),
            |x: &&i32| **x,
            |x: &&i32| **x,
            |a: &i32, _: &i32| *a,
        );
        assert!(node.begin().next().is_none());
    }

    #[test]
    fn test_owned_outer_cloned_once_per_match() {
        let clones = Rc::new(Cell::new(0));
        let outer = vec![
            Counted { key: 1, clones: Rc::clone(&clones) },
            Counted { key: 2, clones: Rc::clone(&clones) },
        ];
        let node = Join::new(
            Values::new(outer),
            Source::new(vec![1, 1, 2, 3]),
            |outer: &Counted| outer.key,
            |inner: &&i32| **inner,
            |outer: Counted, inner: &i32| outer.key * 10 + inner,
        );

        let result: Vec<i32> = node.begin().collect();
        assert_eq!(result, vec![11, 11, 22]);
        // Two when the owned values are opened, then one per match.
        assert_eq!(clones.get(), 2 + 3);
    }
}
