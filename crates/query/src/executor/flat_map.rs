//! FlatMap node.

use crate::executor::{Node, NodeMut};
use crate::plan::{Describe, Plan};
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::iter::Fuse;
use qpipe_core::{NodeKind, OperatorKind};

/// FlatMap node - flattens the sub-sequence a producer returns for each upstream element.
#[derive(Clone)]
pub struct FlatMap<N, F> {
    upstream: N,
    producer: F,
}

impl<N, F> FlatMap<N, F> {
    /// Creates a new flat-map node.
    pub fn new(upstream: N, producer: F) -> Self {
        Self { upstream, producer }
    }
}

impl<N: Describe, F> Describe for FlatMap<N, F> {
    fn kind(&self) -> NodeKind {
        NodeKind::Operator(OperatorKind::FlatMap)
    }

    fn describe(&self) -> Plan {
        Plan::new(self.kind()).with_child(self.upstream.describe())
    }
}

impl<'q, N, F, S> Node<'q> for FlatMap<N, F>
where
    N: Node<'q>,
    F: Fn(N::Item) -> S + 'q,
    S: IntoIterator,
{
    type Item = S::Item;
    type Cursor = FlatMapCursor<'q, N::Cursor, F, S::IntoIter>;

    fn begin(&'q self) -> Self::Cursor {
        FlatMapCursor {
            upstream: self.upstream.begin(),
            producer: &self.producer,
            produced: None,
            position: 0,
        }
    }
}

impl<'q, N, F, S> NodeMut<'q> for FlatMap<N, F>
where
    N: NodeMut<'q>,
    F: Fn(N::ItemMut) -> S + 'q,
    S: IntoIterator,
{
    type ItemMut = S::Item;
    type CursorMut = FlatMapCursorMut<'q, N::CursorMut, F, S::IntoIter>;

    fn begin_mut(&'q mut self) -> Self::CursorMut {
        FlatMapCursorMut {
            upstream: self.upstream.begin_mut(),
            producer: &self.producer,
            produced: None,
        }
    }
}

/// The sub-sequence a cursor is walking, shared between the cursor and its copies.
///
/// `buffer` holds the elements pulled from `source` that some copy has not read yet;
/// `offset` is the position of its front element within the sub-sequence.
struct Produced<I: Iterator> {
    source: Fuse<I>,
    buffer: VecDeque<I::Item>,
    offset: usize,
    duplicate: Option<fn(&I::Item) -> I::Item>,
}

impl<I: Iterator> Produced<I> {
    fn new(source: I) -> Self {
        Self {
            source: source.fuse(),
            buffer: VecDeque::new(),
            offset: 0,
            duplicate: None,
        }
    }

    /// Moves the element at `position` out. Only valid while one cursor owns the state.
    fn take(&mut self, position: usize) -> Option<I::Item> {
        self.buffer.drain(..position - self.offset);
        self.offset = position;
        let item = self.buffer.pop_front().or_else(|| self.source.next());
        if item.is_some() {
            self.offset += 1;
        }
        item
    }

    /// Returns a copy of the element at `position`, pulling it from the source if no
    /// cursor got that far yet.
    fn share(&mut self, position: usize) -> Option<I::Item> {
        // Only cloning a cursor shares the state, and cloning installs `duplicate`.
        let Some(duplicate) = self.duplicate else {
            return self.take(position);
        };
        if let Some(item) = self.buffer.get(position - self.offset) {
            return Some(duplicate(item));
        }
        let item = self.source.next()?;
        self.buffer.push_back(duplicate(&item));
        Some(item)
    }
}

/// Cursor of a flat-map node under shared traversal.
///
/// The current sub-sequence is pulled lazily, one element per step, so the producer may
/// return an unbounded sequence. Clones of the cursor share it and never re-invoke the
/// producer; each keeps its own position. Elements are moved out while the cursor has
/// no live copies and cloned into a shared buffer only while it does. Empty
/// sub-sequences are skipped.
pub struct FlatMapCursor<'q, C, F, I: Iterator> {
    upstream: C,
    producer: &'q F,
    produced: Option<Rc<RefCell<Produced<I>>>>,
    position: usize,
}

impl<'q, C, F, S, I> Iterator for FlatMapCursor<'q, C, F, I>
where
    C: Iterator,
    F: Fn(C::Item) -> S,
    S: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(produced) = &mut self.produced {
                let item = match Rc::get_mut(produced) {
                    Some(owned) => owned.get_mut().take(self.position),
                    None => produced.borrow_mut().share(self.position),
                };
                if item.is_some() {
                    self.position += 1;
                    return item;
                }
                self.produced = None;
            }

            let element = self.upstream.next()?;
            let source = (self.producer)(element).into_iter();
            self.produced = Some(Rc::new(RefCell::new(Produced::new(source))));
            self.position = 0;
        }
    }
}

impl<'q, C, F, I> Clone for FlatMapCursor<'q, C, F, I>
where
    C: Clone,
    I: Iterator,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        if let Some(produced) = &self.produced {
            produced.borrow_mut().duplicate = Some(<I::Item as Clone>::clone);
        }
        Self {
            upstream: self.upstream.clone(),
            producer: self.producer,
            produced: self.produced.clone(),
            position: self.position,
        }
    }
}

/// Cursor of a flat-map node under exclusive traversal.
///
/// Holds the produced sub-sequence's own iterator, which may hand out mutable
/// references into upstream elements. Not cloneable.
pub struct FlatMapCursorMut<'q, C, F, I> {
    upstream: C,
    producer: &'q F,
    produced: Option<I>,
}

impl<'q, C, F, S, I> Iterator for FlatMapCursorMut<'q, C, F, I>
where
    C: Iterator,
    F: Fn(C::Item) -> S,
    S: IntoIterator<IntoIter = I>,
    I: Iterator,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if let Some(produced) = &mut self.produced {
                if let Some(item) = produced.next() {
                    return Some(item);
                }
            }
            let element = self.upstream.next()?;
            self.produced = Some((self.producer)(element).into_iter());
        }
    }
}
