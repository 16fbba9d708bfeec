//! Source normalization.
//!
//! A container becomes a pipeline source by exposing its elements as a slice and
//! declaring who owns them and whether they may be mutated. Wrapping a container never
//! copies it: an owned container is moved in, a borrowed one stays borrowed.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

/// Who owns a source's elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The pipeline owns the container.
    Owned,
    /// The caller owns the container; the pipeline borrows it.
    Borrowed,
}

/// Whether a source permits mutable access to its elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mutability {
    Mutable,
    ReadOnly,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ownership::Owned => f.write_str("owned"),
            Ownership::Borrowed => f.write_str("borrowed"),
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutability::Mutable => f.write_str("mutable"),
            Mutability::ReadOnly => f.write_str("read-only"),
        }
    }
}

/// A contiguous sequence a pipeline can be rooted on.
pub trait Sequence {
    /// Element type.
    type Elem;

    /// Whether the pipeline owns or borrows the elements.
    const OWNERSHIP: Ownership;

    /// Whether the elements may be mutated through the pipeline.
    const MUTABILITY: Mutability;

    /// Returns the elements in order.
    fn as_slice(&self) -> &[Self::Elem];

    /// Returns the number of elements.
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence whose elements may be mutated through the pipeline.
pub trait SequenceMut: Sequence {
    /// Returns the elements in order, mutably.
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

impl<T> Sequence for Vec<T> {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Owned;
    const MUTABILITY: Mutability = Mutability::Mutable;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<T> SequenceMut for Vec<T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Owned;
    const MUTABILITY: Mutability = Mutability::Mutable;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<T, const N: usize> SequenceMut for [T; N] {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

impl<T> Sequence for Box<[T]> {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Owned;
    const MUTABILITY: Mutability = Mutability::Mutable;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<T> SequenceMut for Box<[T]> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

// Shared ownership: the pipeline holds one strong count, other holders may read too.
impl<T> Sequence for Rc<[T]> {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Owned;
    const MUTABILITY: Mutability = Mutability::ReadOnly;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Borrowed;
    const MUTABILITY: Mutability = Mutability::ReadOnly;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Borrowed;
    const MUTABILITY: Mutability = Mutability::ReadOnly;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T> Sequence for &'a mut [T] {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Borrowed;
    const MUTABILITY: Mutability = Mutability::Mutable;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T> SequenceMut for &'a mut [T] {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

impl<'a, T> Sequence for &'a mut Vec<T> {
    type Elem = T;
    const OWNERSHIP: Ownership = Ownership::Borrowed;
    const MUTABILITY: Mutability = Mutability::Mutable;

    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T> SequenceMut for &'a mut Vec<T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}
