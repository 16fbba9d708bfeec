//! Plan descriptions of pipeline values.

use alloc::vec::Vec;
use core::fmt;
use qpipe_core::NodeKind;

/// A description of one pipeline node and its upstream nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    kind: NodeKind,
    detail: Option<&'static str>,
    children: Vec<Plan>,
}

impl Plan {
    /// Creates a plan node without children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            detail: None,
            children: Vec::new(),
        }
    }

    /// Attaches a short note, e.g. the accumulator strategy.
    pub fn with_detail(mut self, detail: &'static str) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Appends an upstream node.
    pub fn with_child(mut self, child: Plan) -> Self {
        self.children.push(child);
        self
    }

    /// Appends upstream nodes.
    pub fn with_children(mut self, children: Vec<Plan>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn detail(&self) -> Option<&'static str> {
        self.detail
    }

    pub fn children(&self) -> &[Plan] {
        &self.children
    }

    /// Returns the number of nodes in this plan, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Plan::node_count).sum::<usize>()
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(detail) = self.detail {
            write!(f, " [{}]", detail)?;
        }
        f.write_str("\n")?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Implemented by every pipeline node.
pub trait Describe {
    /// The kind of this node.
    fn kind(&self) -> NodeKind;

    /// Describes this node and everything upstream of it.
    fn describe(&self) -> Plan;
}
