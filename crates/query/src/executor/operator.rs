//! Node traits for query execution.

use crate::plan::Describe;

/// A pipeline node that can be traversed through shared access.
///
/// `begin` opens a fresh cursor every time it is called; nothing a traversal builds
/// (accumulators, produced sub-sequences) survives into the next one. Cursors are plain
/// iterators: `None` marks the end state.
///
/// Elements borrowed from storage the node owns carry the lifetime `'q` of the borrow
/// `begin` was called with.
pub trait Node<'q>: Describe {
    /// The element type this node emits.
    type Item;
    /// The cursor this node opens.
    type Cursor: Iterator<Item = Self::Item>;

    /// Opens a new traversal.
    fn begin(&'q self) -> Self::Cursor;
}

/// A pipeline node that can be traversed with exclusive access.
///
/// Implemented by sources over mutable storage and by the operators that hand upstream
/// elements or function results through (Map, Filter, FlatMap, Concat). Operators that
/// emit accumulator contents, and Join, only support shared traversal.
pub trait NodeMut<'q>: Describe {
    /// The element type this node emits.
    type ItemMut;
    /// The cursor this node opens.
    type CursorMut: Iterator<Item = Self::ItemMut>;

    /// Opens a new exclusive traversal.
    fn begin_mut(&'q mut self) -> Self::CursorMut;
}
