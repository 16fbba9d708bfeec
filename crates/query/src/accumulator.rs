//! Per-traversal accumulators for the set operators.
//!
//! Distinct and Union keep a seen-set, Intersect keeps a counting map. Which collection
//! backs them is picked by a strategy marker: [`Hashed`] for `Hash + Eq` elements,
//! [`Ordered`] for `Ord` elements. Keys are the element handles themselves, so for
//! reference elements the accumulator stores references, never copies of the referents.

use alloc::collections::{BTreeMap, BTreeSet};
use core::hash::Hash;
use hashbrown::{HashMap, HashSet};

/// A set of elements seen so far.
pub trait SeenSet<K>: Default + Clone {
    /// Records `key`. Returns true if it was not seen before.
    fn remember(&mut self, key: K) -> bool;
}

/// A map counting, per element, how many operands produced it.
pub trait CountMap<K>: Default + Clone {
    /// Increments the count of `key` and returns the new count.
    fn bump(&mut self, key: K) -> usize;
}

impl<K: Hash + Eq + Clone> SeenSet<K> for HashSet<K> {
    #[inline]
    fn remember(&mut self, key: K) -> bool {
        HashSet::insert(self, key)
    }
}

impl<K: Ord + Clone> SeenSet<K> for BTreeSet<K> {
    #[inline]
    fn remember(&mut self, key: K) -> bool {
        BTreeSet::insert(self, key)
    }
}

impl<K: Hash + Eq + Clone> CountMap<K> for HashMap<K, usize> {
    #[inline]
    fn bump(&mut self, key: K) -> usize {
        let count = self.entry(key).or_insert(0);
        *count += 1;
        *count
    }
}

impl<K: Ord + Clone> CountMap<K> for BTreeMap<K, usize> {
    #[inline]
    fn bump(&mut self, key: K) -> usize {
        let count = self.entry(key).or_insert(0);
        *count += 1;
        *count
    }
}

/// Names an accumulator strategy in plan descriptions.
pub trait Accumulation {
    const NAME: &'static str;
}

/// Selects the accumulator collections for elements of type `K`.
pub trait Strategy<K>: Accumulation {
    type Seen: SeenSet<K>;
    type Counts: CountMap<K>;
}

/// Hash-based accumulators, for `Hash + Eq` elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hashed;

/// Tree-based accumulators, for `Ord` elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ordered;

impl Accumulation for Hashed {
    const NAME: &'static str = "hashed";
}

impl Accumulation for Ordered {
    const NAME: &'static str = "ordered";
}

impl<K: Hash + Eq + Clone> Strategy<K> for Hashed {
    type Seen = HashSet<K>;
    type Counts = HashMap<K, usize>;
}

impl<K: Ord + Clone> Strategy<K> for Ordered {
    type Seen = BTreeSet<K>;
    type Counts = BTreeMap<K, usize>;
}
