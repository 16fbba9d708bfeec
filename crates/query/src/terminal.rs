//! Terminal operations.
//!
//! Thin folds written against the cursor protocol. Each call opens a fresh traversal, so
//! they can run any number of times on the same query.

use crate::executor::{Node, NodeMut};
use crate::plan::Describe;
use crate::query::Query;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashSet;
use qpipe_core::{Constness, Error, ReadWrite, Result};

impl<N: Describe, C: Constness> Query<N, C> {
    /// Collects the elements in traversal order.
    pub fn to_vec<'q>(&'q self) -> Vec<N::Item>
    where
        N: Node<'q>,
    {
        let mut cursor = self.begin();
        let mut result = Vec::new();
        while let Some(item) = cursor.take_current() {
            result.push(item);
        }
        result
    }

    /// Collects the elements into a hash set.
    pub fn to_set<'q>(&'q self) -> HashSet<N::Item>
    where
        N: Node<'q>,
        N::Item: Hash + Eq,
    {
        self.begin().collect()
    }

    /// Collects the elements into an ordered set.
    pub fn to_ordered_set<'q>(&'q self) -> BTreeSet<N::Item>
    where
        N: Node<'q>,
        N::Item: Ord,
    {
        self.begin().collect()
    }

    /// Counts the elements.
    pub fn count<'q>(&'q self) -> usize
    where
        N: Node<'q>,
    {
        let mut cursor = self.begin();
        while !cursor.is_end() {
            cursor.advance();
        }
        cursor.position()
    }

    /// Returns true if any element satisfies `predicate`. Stops at the first match.
    pub fn any<'q, P>(&'q self, mut predicate: P) -> bool
    where
        N: Node<'q>,
        P: FnMut(&N::Item) -> bool,
    {
        let mut cursor = self.begin();
        while !cursor.is_end() {
            if predicate(cursor.get()) {
                return true;
            }
            cursor.advance();
        }
        false
    }

    /// Returns true if every element satisfies `predicate`. True for an empty query.
    pub fn all<'q, P>(&'q self, mut predicate: P) -> bool
    where
        N: Node<'q>,
        P: FnMut(&N::Item) -> bool,
    {
        !self.any(|item| !predicate(item))
    }

    /// Returns true if some element equals `value`.
    pub fn contains<'q, T>(&'q self, value: &T) -> bool
    where
        N: Node<'q>,
        N::Item: PartialEq<T>,
        T: ?Sized,
    {
        self.any(|item| item == value)
    }

    /// Folds the elements into `seed`.
    pub fn aggregate<'q, A, F>(&'q self, seed: A, mut fold: F) -> A
    where
        N: Node<'q>,
        F: FnMut(A, N::Item) -> A,
    {
        let mut cursor = self.begin();
        let mut acc = seed;
        while let Some(item) = cursor.take_current() {
            acc = fold(acc, item);
        }
        acc
    }

    /// Folds the elements using the first one as the seed.
    pub fn reduce<'q, F>(&'q self, mut fold: F) -> Result<N::Item>
    where
        N: Node<'q>,
        F: FnMut(N::Item, N::Item) -> N::Item,
    {
        let mut cursor = self.begin();
        let mut acc = cursor
            .take_current()
            .ok_or_else(|| Error::empty_sequence("reduce"))?;
        while let Some(item) = cursor.take_current() {
            acc = fold(acc, item);
        }
        Ok(acc)
    }

    /// Averages `selector` over the elements.
    pub fn average<'q, F>(&'q self, mut selector: F) -> Result<f64>
    where
        N: Node<'q>,
        F: FnMut(N::Item) -> f64,
    {
        let (sum, count) = self.aggregate((0.0, 0usize), |(sum, count), item| {
            (sum + selector(item), count + 1)
        });
        if count == 0 {
            return Err(Error::empty_sequence("average"));
        }
        Ok(sum / count as f64)
    }
}

impl<N: Describe> Query<N, ReadWrite> {
    /// Calls `f` on every element of an exclusive traversal.
    pub fn for_each_mut<'q, F>(&'q mut self, mut f: F)
    where
        N: NodeMut<'q>,
        F: FnMut(N::ItemMut),
    {
        let mut cursor = self.begin_mut();
        while let Some(item) = cursor.take_current() {
            f(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{from, values};
    use alloc::vec;
    use alloc::vec::Vec;
    use qpipe_core::Error;

    #[test]
    fn test_to_vec_and_count() {
        let query = from(vec![3, 1, 2]).map(|x: &i32| x + 1);
        assert_eq!(query.to_vec(), vec![4, 2, 3]);
        assert_eq!(query.count(), 3);
        assert_eq!(query.to_vec(), vec![4, 2, 3]);
    }

    #[test]
    fn test_sets() {
        let query = values(vec![2, 1, 2, 3]);
        assert_eq!(query.to_set().len(), 3);
        assert_eq!(query.to_ordered_set().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_predicates() {
        let query = from(vec![2, 4, 6]);
        assert!(query.all(|x: &&i32| **x % 2 == 0));
        assert!(query.any(|x: &&i32| **x > 5));
        assert!(!query.any(|x: &&i32| **x > 6));
        assert!(query.contains(&&4));
        assert!(!query.contains(&&5));

        let empty = from(Vec::<i32>::new());
        assert!(empty.all(|_: &&i32| false));
        assert!(!empty.any(|_: &&i32| true));
    }

    #[test]
    fn test_folds() {
        let query = values(1..=4);
        assert_eq!(query.aggregate(0, |acc, x| acc + x), 10);
        assert_eq!(query.reduce(|a, b| a * b), Ok(24));
        assert_eq!(query.average(|x| x as f64), Ok(2.5));

        let empty = values(0..0);
        assert_eq!(empty.reduce(|a, b| a + b), Err(Error::empty_sequence("reduce")));
        assert_eq!(empty.average(|x| x as f64), Err(Error::empty_sequence("average")));
    }

    #[test]
    fn test_for_each_mut() {
        let mut data = vec![1, 2, 3];
        let mut query = from(&mut data);
        query.for_each_mut(|x| *x *= 2);
        assert_eq!(data, vec![2, 4, 6]);
    }
}
