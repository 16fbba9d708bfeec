//! Leaf nodes: sequence sources and value sources.

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use core::slice;
use qpipe_core::{Mutability, NodeKind, Ownership, Sequence, SequenceMut};

/// A source over a sequence the pipeline owns or borrows.
///
/// Traversals hand out references into the sequence; nothing is copied.
#[derive(Clone, Debug)]
pub struct Source<S> {
    sequence: S,
}

impl<S: Sequence> Source<S> {
    /// Creates a new source. The sequence is moved in, not copied.
    pub fn new(sequence: S) -> Self {
        Self { sequence }
    }

    /// Returns the wrapped sequence.
    pub fn sequence(&self) -> &S {
        &self.sequence
    }

    pub fn ownership(&self) -> Ownership {
        S::OWNERSHIP
    }

    pub fn mutability(&self) -> Mutability {
        S::MUTABILITY
    }

    /// Returns the number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl<S: Sequence> Describe for Source<S> {
    fn kind(&self) -> NodeKind {
        NodeKind::Source {
            ownership: S::OWNERSHIP,
            mutability: S::MUTABILITY,
        }
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind())
    }
}

impl<'q, S> Node<'q> for Source<S>
where
    S: Sequence + 'q,
    S::Elem: 'q,
{
    type Item = &'q S::Elem;
    type Cursor = slice::Iter<'q, S::Elem>;

    fn begin(&'q self) -> Self::Cursor {
        self.sequence.as_slice().iter()
    }
}

impl<'q, S> NodeMut<'q> for Source<S>
where
    S: SequenceMut + 'q,
    S::Elem: 'q,
{
    type ItemMut = &'q mut S::Elem;
    type CursorMut = slice::IterMut<'q, S::Elem>;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        self.sequence.as_mut_slice().iter_mut()
    }
}

/// A source that produces fresh values on every traversal.
///
/// Wraps any cloneable `IntoIterator` (ranges, adapters over borrowed data). Each
/// traversal iterates a clone, so the elements are owned values.
#[derive(Clone, Debug)]
pub struct Values<I> {
    values: I,
}

impl<I> Values<I> {
    /// Creates a new value source.
    pub fn new(values: I) -> Self {
        Self { values }
    }
}

impl<I> Describe for Values<I> {
    fn kind(&self) -> NodeKind {
        NodeKind::Values
    }

    fn describe(&self) -> Plan {
        Plan::new(NodeKind::Values)
    }
}

impl<'q, I> Node<'q> for Values<I>
where
    I: IntoIterator + Clone + 'q,
{
    type Item = I::Item;
    type Cursor = I::IntoIter;

    fn begin(&'q self) -> Self::Cursor {
        self.values.clone().into_iter()
    }
}

impl<'q, I> NodeMut<'q> for Values<I>
where
    I: IntoIterator + Clone + 'q,
{
    type ItemMut = I::Item;
    type CursorMut = I::IntoIter;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        self.values.clone().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_owned_source() {
        let source = Source::new(vec![1, 2, 3]);
        assert_eq!(source.ownership(), Ownership::Owned);
        assert_eq!(source.mutability(), Mutability::Mutable);
        assert_eq!(source.len(), 3);

        let items: Vec<&i32> = source.begin().collect();
        assert_eq!(items, vec![&1, &2, &3]);
    }

    #[test]
    fn test_source_yields_references_into_storage() {
        let data = vec![10, 20];
        let source = Source::new(&data);
        let first = source.begin().next().unwrap();
        assert!(core::ptr::eq(first, &data[0]));
        assert_eq!(
            source.kind(),
            NodeKind::Source {
                ownership: Ownership::Borrowed,
                mutability: Mutability::ReadOnly,
            }
        );
    }

    #[test]
    fn test_mutable_source() {
        let mut data = vec![1, 2, 3];
        {
            let mut source = Source::new(&mut data);
            for item in source.begin_mut() {
                *item *= 10;
            }
        }
        assert_eq!(data, vec![10, 20, 30]);
    }

    #[test]
    fn test_values_retraversal() {
        let values = Values::new(1..4);
        let first: Vec<i32> = values.begin().collect();
        let second: Vec<i32> = values.begin().collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(values.describe(), Plan::new(NodeKind::Values));
    }

    #[test]
    fn test_empty_source() {
        let source = Source::new(Vec::<i32>::new());
        assert!(source.is_empty());
        assert!(source.begin().next().is_none());
    }
}
