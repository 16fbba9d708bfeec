//! qpipe Query - lazy, composable query pipelines over in-memory sequences.
//!
//! This crate provides:
//!
//! - `executor`: pipeline nodes (sources, Map, Filter, FlatMap, Join, Distinct, Union,
//!   Intersect, Concat) and their cursors
//! - `visitor`: sequential and round-robin pulling from N operands
//! - `accumulator`: seen-sets and counting maps backing the set operators
//! - `cursor`: the explicit cursor protocol
//! - `query`: the pipeline builder and freeze
//! - `terminal`: folds such as `to_vec`, `count` and `average`
//! - `plan`: plan descriptions of a pipeline
//!
//! # Example
//!
//! ```
//! use qpipe_query::from;
//!
//! let orders = vec![(1, 30), (2, 15), (1, 5)];
//! let customers = vec![1, 2, 3];
//!
//! let totals = from(&customers)
//!     .join(
//!         from(&orders),
//!         |c: &&i32| **c,
//!         |o: &&(i32, i32)| o.0,
//!         |c: &i32, o: &(i32, i32)| (*c, o.1),
//!     )
//!     .filter(|pair: &(i32, i32)| pair.1 > 10);
//!
//! assert_eq!(totals.to_vec(), vec![(1, 30), (2, 15)]);
//! // Traversing again rebuilds everything from scratch.
//! assert_eq!(totals.count(), 2);
//! ```

#![no_std]

extern crate alloc;

pub mod accumulator;
pub mod cursor;
pub mod executor;
pub mod plan;
pub mod query;
mod terminal;
pub mod visitor;

pub use accumulator::{Hashed, Ordered};
pub use cursor::Cursor;
pub use executor::{Node, NodeMut};
pub use plan::{Describe, Plan};
pub use query::{
    concat_all, from, intersect_all, intersect_all_ordered, union_all, union_all_ordered, values,
    Query,
};
pub use qpipe_core::{AccessMode, Error, ReadOnly, ReadWrite, Result};
