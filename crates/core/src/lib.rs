//! qpipe Core - Shared vocabulary for the qpipe query pipeline.
//!
//! This crate provides the types every other qpipe crate speaks in:
//!
//! - `OperatorKind`: The closed set of pipeline operators (Map, FlatMap, Filter, Join,
//!   Union, Intersect, Concat, Distinct)
//! - `NodeKind`: An operator or a leaf source, as reported by plan descriptions
//! - `AccessMode`: Whether an emitted element is an owned value, a mutable reference or an
//!   immutable reference, plus the rules deriving it per operator
//! - `Sequence`: The interface a container implements to become a pipeline source
//! - `Error`: Error types for cursor misuse and empty folds
//!
//! # Example
//!
//! ```rust
//! use qpipe_core::{AccessMode, ElementOrigin, OperatorKind, Sequence, Ownership};
//!
//! // Filter hands upstream elements through untouched...
//! assert_eq!(OperatorKind::Filter.origin(), ElementOrigin::PassThrough);
//!
//! // ...so freezing the pipeline narrows a mutable reference to an immutable one.
//! let mode = AccessMode::transform(ElementOrigin::PassThrough, AccessMode::MutableReference, true);
//! assert_eq!(mode, AccessMode::ImmutableReference);
//!
//! // A borrowed vector is a read-only, borrowed source.
//! let data = vec![1, 2, 3];
//! assert_eq!(<&Vec<i32> as Sequence>::OWNERSHIP, Ownership::Borrowed);
//! assert_eq!(Sequence::as_slice(&&data), &[1, 2, 3]);
//! ```

#![no_std]

extern crate alloc;

mod access;
mod error;
mod kind;
pub mod sequence;

pub use access::{AccessMode, Constness, ElementOrigin, ReadOnly, ReadWrite, Shape};
pub use error::{Error, Result};
pub use kind::{NodeKind, OperatorKind};
pub use sequence::{Mutability, Ownership, Sequence, SequenceMut};
