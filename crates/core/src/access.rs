//! Access-mode algebra.
//!
//! An element leaving a pipeline is either a value the caller now owns, a mutable
//! reference into some storage, or an immutable reference into it. The mode of an
//! operator's output follows from where its elements come from (`ElementOrigin`), the
//! mode of its input and whether the pipeline was frozen.
//!
//! The compiler enforces these rules through the element types themselves (`&T`,
//! `&mut T`, owned `T`) and the `ReadWrite`/`ReadOnly` type state; `AccessMode` is the
//! runtime description of the same table.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

/// How an emitted element may be accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Produced fresh; the caller owns it.
    OwnedValue,
    /// Aliases storage and may be mutated through.
    MutableReference,
    /// Aliases storage, read-only.
    ImmutableReference,
}

/// Where an operator's output elements come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementOrigin {
    /// Held by an internal accumulator (Distinct, Union, Intersect).
    Accumulator,
    /// An upstream element handed through untouched (Filter, Concat, sources).
    PassThrough,
    /// The result of a user function (Map, FlatMap, Join).
    FunctionResult,
}

impl AccessMode {
    /// Narrows a mutable reference to an immutable one when `frozen` is set.
    pub fn narrow(self, frozen: bool) -> AccessMode {
        match self {
            AccessMode::MutableReference if frozen => AccessMode::ImmutableReference,
            mode => mode,
        }
    }

    /// Derives the output mode of an operator.
    ///
    /// `input` is the mode of the upstream element for pass-through and accumulator
    /// origins, and the declared return shape of the user function for function results.
    ///
    /// Accumulator contents are never handed out mutably. Owned inputs stay owned: the
    /// caller receives the element while the accumulator keeps its own key.
    pub fn transform(origin: ElementOrigin, input: AccessMode, frozen: bool) -> AccessMode {
        match origin {
            ElementOrigin::Accumulator => match input {
                AccessMode::OwnedValue => AccessMode::OwnedValue,
                AccessMode::MutableReference | AccessMode::ImmutableReference => {
                    AccessMode::ImmutableReference
                }
            },
            ElementOrigin::PassThrough | ElementOrigin::FunctionResult => input.narrow(frozen),
        }
    }

    /// Returns true for references, mutable or not.
    pub fn is_reference(self) -> bool {
        !matches!(self, AccessMode::OwnedValue)
    }

    /// Returns true if elements may be mutated through.
    pub fn is_mutable(self) -> bool {
        matches!(self, AccessMode::MutableReference)
    }
}

/// Query constness, carried as a type parameter of a pipeline value.
pub trait Constness {
    /// Whether the pipeline was frozen to read-only access.
    const FROZEN: bool;
}

/// A pipeline that may hand out mutable references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadWrite;

/// A frozen pipeline. There is no way back to `ReadWrite`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadOnly;

impl Constness for ReadWrite {
    const FROZEN: bool = false;
}

impl Constness for ReadOnly {
    const FROZEN: bool = true;
}

/// The access mode an element type stands for.
///
/// References report their mutability; everything else is an owned value. Owned types
/// outside this crate opt in with a one-line impl.
pub trait Shape {
    const MODE: AccessMode;
}

impl<T: ?Sized> Shape for &T {
    const MODE: AccessMode = AccessMode::ImmutableReference;
}

impl<T: ?Sized> Shape for &mut T {
    const MODE: AccessMode = AccessMode::MutableReference;
}

macro_rules! owned_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shape for $ty {
                const MODE: AccessMode = AccessMode::OwnedValue;
            }
        )*
    };
}

owned_shape!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String,
);

impl<T> Shape for Vec<T> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<T> Shape for Option<T> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<T: ?Sized> Shape for Box<T> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<T: ?Sized> Shape for Rc<T> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<T> Shape for BTreeSet<T> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<K, V> Shape for BTreeMap<K, V> {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<A, B> Shape for (A, B) {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<A, B, C> Shape for (A, B, C) {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

impl<A, B, C, D> Shape for (A, B, C, D) {
    const MODE: AccessMode = AccessMode::OwnedValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: [AccessMode; 3] = [
        AccessMode::OwnedValue,
        AccessMode::MutableReference,
        AccessMode::ImmutableReference,
    ];

    #[test]
    fn test_accumulator_never_mutable() {
        for input in ALL_MODES {
            for frozen in [false, true] {
                let mode = AccessMode::transform(ElementOrigin::Accumulator, input, frozen);
                assert!(!mode.is_mutable());
            }
        }
        assert_eq!(
            AccessMode::transform(ElementOrigin::Accumulator, AccessMode::MutableReference, false),
            AccessMode::ImmutableReference
        );
    }

    #[test]
    fn test_pass_through_keeps_mode() {
        for input in ALL_MODES {
            assert_eq!(
                AccessMode::transform(ElementOrigin::PassThrough, input, false),
                input
            );
        }
    }

    #[test]
    fn test_freeze_only_narrows() {
        for origin in [ElementOrigin::PassThrough, ElementOrigin::FunctionResult] {
            assert_eq!(
                AccessMode::transform(origin, AccessMode::MutableReference, true),
                AccessMode::ImmutableReference
            );
            assert_eq!(
                AccessMode::transform(origin, AccessMode::OwnedValue, true),
                AccessMode::OwnedValue
            );
            assert_eq!(
                AccessMode::transform(origin, AccessMode::ImmutableReference, true),
                AccessMode::ImmutableReference
            );
        }
    }

    #[test]
    fn test_shape_of_types() {
        assert_eq!(<&i32 as Shape>::MODE, AccessMode::ImmutableReference);
        assert_eq!(<&mut String as Shape>::MODE, AccessMode::MutableReference);
        assert_eq!(<i32 as Shape>::MODE, AccessMode::OwnedValue);
        assert_eq!(<(&i32, &i32) as Shape>::MODE, AccessMode::OwnedValue);
        assert!(<&str as Shape>::MODE.is_reference());
    }

    #[test]
    fn test_constness() {
        assert!(!ReadWrite::FROZEN);
        assert!(ReadOnly::FROZEN);
    }
}
