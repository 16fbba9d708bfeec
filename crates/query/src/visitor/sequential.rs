//! Sequential visitor.

use super::CursorSet;
use tracing::trace;

/// Exhausts each operand in full before moving to the next one.
///
/// Operand cursors are opened up front, but cursors are lazy: nothing is pulled from
/// an operand before it becomes active.
#[derive(Clone, Debug)]
pub struct Sequential<C> {
    cursors: C,
    active: usize,
}

impl<C: CursorSet> Sequential<C> {
    /// Creates a new sequential visitor starting at the first operand.
    pub fn new(cursors: C) -> Self {
        Self { cursors, active: 0 }
    }

    /// Returns the index of the operand currently pulled from.
    ///
    /// Equals `C::COUNT` once every operand is exhausted.
    pub fn active(&self) -> usize {
        self.active
    }
}

impl<C: CursorSet> Iterator for Sequential<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        while self.active < C::COUNT {
            if let Some(item) = self.cursors.next_of(self.active) {
                return Some(item);
            }
            trace!(operand = self.active, "sequential operand exhausted");
            self.active += 1;
        }
        None
    }
}
