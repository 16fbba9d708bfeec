//! Explicit cursor protocol.
//!
//! Node cursors are iterators. [`Cursor`] wraps one in the begin / is-end / dereference /
//! advance / equality protocol that the terminal operations are written against.

use qpipe_core::{Error, NodeKind, Result};

/// A positioned cursor over a node's elements.
///
/// The current element is pulled from upstream eagerly: a fresh cursor is already at the
/// first element (or at the end), and `advance` moves to the next one.
pub struct Cursor<I: Iterator> {
    inner: I,
    current: Option<I::Item>,
    position: usize,
    node: NodeKind,
}

impl<I: Iterator> Cursor<I> {
    /// Creates a new cursor and moves it onto the first element.
    pub fn new(mut inner: I, node: NodeKind) -> Self {
        let current = inner.next();
        Self {
            inner,
            current,
            position: 0,
            node,
        }
    }

    /// Returns true if the cursor is past the last element.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the number of times the cursor was advanced.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the kind of node this cursor traverses.
    pub fn node(&self) -> NodeKind {
        self.node
    }

    /// Returns the current element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end. Use [`Cursor::try_get`] to check instead.
    pub fn get(&self) -> &I::Item {
        match &self.current {
            Some(item) => item,
            None => panic!("{}", Error::invalid_dereference(self.node)),
        }
    }

    /// Returns the current element, or an error at the end.
    pub fn try_get(&self) -> Result<&I::Item> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::invalid_dereference(self.node))
    }

    /// Returns the current element mutably, or `None` at the end.
    ///
    /// For mutable traversals the element is itself a `&mut T` into storage.
    pub fn get_mut(&mut self) -> Option<&mut I::Item> {
        self.current.as_mut()
    }

    /// Moves to the next element. Does nothing at the end.
    pub fn advance(&mut self) {
        if self.current.is_some() {
            self.current = self.inner.next();
            self.position += 1;
        }
    }

    /// Takes the current element and advances.
    pub fn take_current(&mut self) -> Option<I::Item> {
        let item = self.current.take()?;
        self.current = self.inner.next();
        self.position += 1;
        Some(item)
    }
}

impl<I> Clone for Cursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            current: self.current.clone(),
            position: self.position,
            node: self.node,
        }
    }
}

/// Two cursors are equal when both are at the end, or when both were advanced the same
/// number of times. Only compare cursors of the same traversal and its copies.
impl<I: Iterator> PartialEq for Cursor<I> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_end(), other.is_end()) {
            (true, true) => true,
            (false, false) => self.position == other.position,
            _ => false,
        }
    }
}

impl<I: Iterator> Iterator for Cursor<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        self.take_current()
    }
}

impl<I: Iterator> core::fmt::Debug for Cursor<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("position", &self.position)
            .field("is_end", &self.is_end())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_cursor_protocol() {
        let data = vec![1, 2];
        let mut cursor = Cursor::new(data.iter(), NodeKind::Values);
        assert!(!cursor.is_end());
        assert_eq!(**cursor.get(), 1);

        cursor.advance();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.try_get(), Ok(&&2));

        cursor.advance();
        assert!(cursor.is_end());
        assert_eq!(
            cursor.try_get(),
            Err(Error::invalid_dereference(NodeKind::Values))
        );

        cursor.advance();
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new(core::iter::empty::<i32>(), NodeKind::Values);
        assert!(cursor.is_end());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    #[should_panic(expected = "past its last element")]
    fn test_get_at_end_panics() {
        let cursor = Cursor::new(core::iter::empty::<i32>(), NodeKind::Values);
        let _ = cursor.get();
    }

    #[test]
    fn test_cursor_equality() {
        let mut a = Cursor::new(0..3, NodeKind::Values);
        let b = a.clone();
        assert_eq!(a, b);

        a.advance();
        assert_ne!(a, b);

        let mut c = b.clone();
        c.advance();
        assert_eq!(a, c);

        let end_a: Vec<i32> = a.by_ref().collect();
        let end_c: Vec<i32> = c.by_ref().collect();
        assert_eq!(end_a, end_c);
        assert_eq!(a, c);
        assert_eq!(a, Cursor::new(0..0, NodeKind::Values));
    }

    #[test]
    fn test_cursor_get_mut() {
        let mut data = vec![1, 2];
        let mut cursor = Cursor::new(data.iter_mut(), NodeKind::Values);
        if let Some(item) = cursor.get_mut() {
            **item = 10;
        }
        drop(cursor);
        assert_eq!(data, vec![10, 2]);
        assert!(alloc::format!("{:?}", Cursor::new(0..1, NodeKind::Values)).contains("position"));
        assert!(!Error::empty_sequence("reduce").to_string().is_empty());
    }
}
