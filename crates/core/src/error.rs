//! Error types for qpipe.

use crate::kind::NodeKind;
use core::fmt;

/// Result type alias for qpipe operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for qpipe pipelines.
///
/// The engine does no I/O, so there is no recoverable runtime error class: these
/// variants describe misuse of a cursor or a fold that has nothing to fold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A cursor was dereferenced at its end.
    InvalidDereference {
        node: NodeKind,
    },
    /// A fold without a seed ran over an empty pipeline.
    EmptySequence {
        operation: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDereference { node } => {
                write!(f, "Invalid dereference: {} cursor is past its last element", node)
            }
            Error::EmptySequence { operation } => {
                write!(f, "Empty sequence: {} needs at least one element", operation)
            }
        }
    }
}

impl Error {
    /// Creates an invalid dereference error.
    pub fn invalid_dereference(node: NodeKind) -> Self {
        Error::InvalidDereference { node }
    }

    /// Creates an empty sequence error.
    pub fn empty_sequence(operation: &'static str) -> Self {
        Error::EmptySequence { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::OperatorKind;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_dereference(NodeKind::Operator(OperatorKind::FlatMap));
        assert!(err.to_string().contains("Invalid dereference"));
        assert!(err.to_string().contains("FlatMap"));

        let err = Error::empty_sequence("average");
        assert!(err.to_string().contains("average"));
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::empty_sequence("reduce");
        match err {
            Error::EmptySequence { operation } => assert_eq!(operation, "reduce"),
            _ => panic!("Wrong error type"),
        }
    }
}
