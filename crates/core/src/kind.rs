//! Operator and node kinds.

use crate::access::ElementOrigin;
use crate::sequence::{Mutability, Ownership};
use core::fmt;

/// The closed set of pipeline operators.
///
/// Every operator node reports exactly one kind, and each kind has exactly one cursor
/// implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// Element-wise projection through a selector.
    Map,
    /// Flattening of the sub-sequences a producer returns per element.
    FlatMap,
    /// Element selection by predicate.
    Filter,
    /// Nested-loop equi-join against a re-iterable inner sequence.
    Join,
    /// Set union of N operands.
    Union,
    /// Set intersection of N operands.
    Intersect,
    /// Ordered append of N operands.
    Concat,
    /// First-seen deduplication.
    Distinct,
}

impl OperatorKind {
    /// All operator kinds, in declaration order.
    pub const ALL: [OperatorKind; 8] = [
        OperatorKind::Map,
        OperatorKind::FlatMap,
        OperatorKind::Filter,
        OperatorKind::Join,
        OperatorKind::Union,
        OperatorKind::Intersect,
        OperatorKind::Concat,
        OperatorKind::Distinct,
    ];

    /// Returns the operator name.
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Map => "Map",
            OperatorKind::FlatMap => "FlatMap",
            OperatorKind::Filter => "Filter",
            OperatorKind::Join => "Join",
            OperatorKind::Union => "Union",
            OperatorKind::Intersect => "Intersect",
            OperatorKind::Concat => "Concat",
            OperatorKind::Distinct => "Distinct",
        }
    }

    /// Where the elements this operator emits come from.
    pub fn origin(self) -> ElementOrigin {
        match self {
            OperatorKind::Map | OperatorKind::FlatMap | OperatorKind::Join => {
                ElementOrigin::FunctionResult
            }
            OperatorKind::Filter | OperatorKind::Concat => ElementOrigin::PassThrough,
            OperatorKind::Union | OperatorKind::Intersect | OperatorKind::Distinct => {
                ElementOrigin::Accumulator
            }
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of a pipeline: a leaf source or an operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A source over a sequence, owned by the pipeline or borrowed from the caller.
    Source {
        ownership: Ownership,
        mutability: Mutability,
    },
    /// A source producing fresh values on every traversal.
    Values,
    /// An operator node.
    Operator(OperatorKind),
}

impl NodeKind {
    /// Returns the operator kind, if this is an operator node.
    pub fn operator(self) -> Option<OperatorKind> {
        match self {
            NodeKind::Operator(kind) => Some(kind),
            _ => None,
        }
    }

    /// Where the elements this node emits come from.
    ///
    /// Sources hand out their elements as they are stored.
    pub fn origin(self) -> ElementOrigin {
        match self {
            NodeKind::Operator(kind) => kind.origin(),
            NodeKind::Source { .. } | NodeKind::Values => ElementOrigin::PassThrough,
        }
    }
}

impl From<OperatorKind> for NodeKind {
    fn from(kind: OperatorKind) -> Self {
        NodeKind::Operator(kind)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Source {
                ownership,
                mutability,
            } => write!(f, "Source ({}, {})", ownership, mutability),
            NodeKind::Values => f.write_str("Values"),
            NodeKind::Operator(kind) => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_operator_origin() {
        assert_eq!(OperatorKind::Map.origin(), ElementOrigin::FunctionResult);
        assert_eq!(OperatorKind::Join.origin(), ElementOrigin::FunctionResult);
        assert_eq!(OperatorKind::Filter.origin(), ElementOrigin::PassThrough);
        assert_eq!(OperatorKind::Concat.origin(), ElementOrigin::PassThrough);
        assert_eq!(OperatorKind::Union.origin(), ElementOrigin::Accumulator);
    }

    #[test]
    fn test_operator_state() {
        let with_accumulator: alloc::vec::Vec<_> = OperatorKind::ALL
            .iter()
            .copied()
            .filter(|k| k.origin() == ElementOrigin::Accumulator)
            .collect();
        assert_eq!(
            with_accumulator,
            alloc::vec![OperatorKind::Union, OperatorKind::Intersect, OperatorKind::Distinct]
        );
    }

    #[test]
    fn test_node_kind_display() {
        let source = NodeKind::Source {
            ownership: Ownership::Borrowed,
            mutability: Mutability::ReadOnly,
        };
        assert_eq!(source.to_string(), "Source (borrowed, read-only)");
        assert_eq!(NodeKind::from(OperatorKind::FlatMap).to_string(), "FlatMap");
        assert_eq!(source.operator(), None);
        assert_eq!(source.origin(), ElementOrigin::PassThrough);
    }
}
