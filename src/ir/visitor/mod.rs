//! Visitor dispatch over the closed set of node kinds.
//!
//! [`SyntaxTree::accept`](crate::ir::syntax_node::SyntaxTree::accept) matches on the
//! node's kind and calls the matching `visit_*` method with a typed handle, the tree,
//! and a caller-supplied context. Null sentinels short-circuit to the default output.
//!
//! # Usage
//!
//! ```ignore
//! use syntax_node::ir::visitor::Visitor;
//!
//! struct LoopCounter(usize);
//!
//! impl Visitor<()> for LoopCounter {
//!     type Output = ();
//!
//!     fn visit_for_statement(&mut self, tree: &SyntaxTree, node: ForStatement, _: ()) {
//!         self.0 += 1;
//!         self.visit_children(tree, node.id(), ());
//!     }
//! }
//! ```

mod visitor_trait;

pub use visitor_trait::Visitor;
