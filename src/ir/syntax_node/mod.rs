//! Arena-backed, mutable syntax tree.
//!
//! Every node lives in a [`SyntaxTree`] and is addressed by a [`NodeId`]. A node
//! knows its parent, its siblings, the bounds of its own child list and the
//! [`Role`](crate::ir::role::Role) it occupies in its parent. The only way to shape
//! a tree is through the attach/detach/replace operations on [`SyntaxTree`], which
//! keep the following invariants after every call (including failed ones):
//!
//! - no node is its own ancestor;
//! - a node has at most one parent and appears once in that parent's child list;
//! - sibling links are mirrored, and a parent's child list runs from `first_child`
//!   to `last_child`;
//! - the shared null sentinels never gain a parent, children or a role.

mod integrity;
mod node_types;
mod position_tracking;
mod traversal;
mod tree;

pub use node_types::{
    AssignmentOperator, BinaryOperator, Literal, NodeCategory, NodeId, NodeKind, NodeType,
    Position, Span, UnaryOperator,
};
pub use traversal::{Ancestors, ChildWalker, Children, Descendants};
pub use tree::{NodeData, SyntaxTree};
