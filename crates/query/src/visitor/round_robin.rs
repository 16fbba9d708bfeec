//! Round-robin visitor.

use super::CursorSet;
use alloc::vec;
use alloc::vec::Vec;
use tracing::trace;

/// Pulls one element per step, rotating over the operands.
///
/// Exhausted operands are skipped. The visitor ends once a full rotation produced
/// nothing, so no operand has to be drained before the others are touched.
#[derive(Clone, Debug)]
pub struct RoundRobin<C> {
    cursors: C,
    turn: usize,
    exhausted: Vec<bool>,
}

impl<C: CursorSet> RoundRobin<C> {
    /// Creates a new round-robin visitor starting at the first operand.
    pub fn new(cursors: C) -> Self {
        Self {
            cursors,
            turn: 0,
            exhausted: vec![false; C::COUNT],
        }
    }

    /// Returns the next element together with the operand that produced it.
    pub fn next_with_operand(&mut self) -> Option<(usize, C::Item)> {
        let mut misses = 0;
        while misses < C::COUNT {
            let operand = self.turn;
            self.turn = (self.turn + 1) % C::COUNT;

            if self.exhausted[operand] {
                misses += 1;
                continue;
            }
            match self.cursors.next_of(operand) {
                Some(item) => return Some((operand, item)),
                None => {
                    trace!(operand, "round-robin operand exhausted");
                    self.exhausted[operand] = true;
                    misses += 1;
                }
            }
        }
        None
    }

    /// Returns true once every operand is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.iter().all(|done| *done)
    }
}

impl<C: CursorSet> Iterator for RoundRobin<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        self.next_with_operand().map(|(_, item)| item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_order() {
        let visitor = RoundRobin::new((1..4, 10..11, 20..23));
        let result: Vec<i32> = visitor.collect();
        assert_eq!(result, vec![1, 10, 20, 2, 21, 3, 22]);
    }

    #[test]
    fn test_round_robin_operands() {
        let mut visitor = RoundRobin::new((0..1, 5..7));
        assert_eq!(visitor.next_with_operand(), Some((0, 0)));
        assert_eq!(visitor.next_with_operand(), Some((1, 5)));
        assert_eq!(visitor.next_with_operand(), Some((1, 6)));
        assert!(!visitor.is_exhausted());
        assert_eq!(visitor.next_with_operand(), None);
        assert!(visitor.is_exhausted());
        assert_eq!(visitor.next_with_operand(), None);
    }

    #[test]
    fn test_round_robin_all_empty() {
        let mut visitor = RoundRobin::new((0..0, 0..0, 0..0, 0..0));
        assert_eq!(visitor.next(), None);
        assert!(visitor.is_exhausted());
    }
}
