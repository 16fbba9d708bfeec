//! Pipeline nodes and their cursors.

mod concat;
pub(crate) mod distinct;
mod filter;
mod flat_map;
mod intersect;
pub mod join;
mod map;
mod operator;
mod source;
mod union;

pub use concat::{Concat, ConcatCursor};
pub use distinct::{Distinct, DistinctCursor, DistinctEach};
pub use filter::{Filter, FilterCursor};
pub use flat_map::{FlatMap, FlatMapCursor, FlatMapCursorMut};
pub use intersect::{Intersect, IntersectCursor};
pub use join::{Join, NestedLoopCursor};
pub use map::{Map, MapCursor};
pub use operator::{Node, NodeMut};
pub use source::{Source, Values};
pub use union::{Union, UnionCursor};
