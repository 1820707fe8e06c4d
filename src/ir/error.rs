//! Error types for tree construction and integrity checks.
//!
//! Every [`TreeError`] is a usage error: the caller handed the tree an operation
//! that would break ownership or typing. Operations that fail leave the tree unchanged.

use thiserror::Error;

use super::syntax_node::{NodeCategory, NodeId, NodeType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {node} already has a parent; detach it before attaching it elsewhere")]
    AlreadyAttached { node: NodeId },

    #[error("node {anchor} is not a child of {parent}")]
    NotAChild { parent: NodeId, anchor: NodeId },

    #[error("cannot add children to null node {node}")]
    NullReceiver { node: NodeId },

    #[error("role `{role}` expects a {expected}, got {found}")]
    RoleMismatch {
        role: &'static str,
        expected: NodeCategory,
        found: NodeType,
    },

    #[error("attaching {node} under {parent} would make it its own ancestor")]
    Cycle { parent: NodeId, node: NodeId },

    #[error("node {node} is frozen")]
    Frozen { node: NodeId },

    #[error("node {node} does not belong to this tree")]
    ForeignNode { node: NodeId },

    #[error("node {node} has no parent, so it has no position to replace")]
    NotAttached { node: NodeId },

    #[error("replacement callback moved {node}, the successor of the replaced node")]
    SuccessorMoved { node: NodeId },
}

/// A broken link found by [`SyntaxTree::verify`](super::syntax_node::SyntaxTree::verify).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("{node}: sibling link to {sibling} is not mirrored")]
    AsymmetricSibling { node: NodeId, sibling: NodeId },

    #[error("{node}: listed under {parent} but its parent link says otherwise")]
    WrongParent { node: NodeId, parent: NodeId },

    #[error("{parent}: child list does not end at the recorded last child")]
    BoundaryMismatch { parent: NodeId },

    #[error("{node}: attached without a role")]
    MissingRole { node: NodeId },

    #[error("{node}: detached but still carries a role or sibling links")]
    StaleLinks { node: NodeId },

    #[error("{node}: has a parent but is missing from its parent's child list")]
    Unreachable { node: NodeId },

    #[error("{node}: is its own ancestor")]
    Cycle { node: NodeId },
}
