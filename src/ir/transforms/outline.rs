//! Indented, one-node-per-line dump of a subtree.
//!
//! Each line shows the role the node occupies, its kind (with payload), and its
//! source range when one is known:
//!
//! ```text
//! ForStatement
//!   Initializer: ExpressionStatement
//!     Expression: AssignmentExpression =
//! ```

use crate::ir::syntax_node::{NodeId, SyntaxTree};
use crate::ir::visitor::Visitor;

#[derive(Debug, Default)]
pub struct OutlinePrinter {
    output: String,
}

impl OutlinePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the subtree rooted at `node`.
    pub fn print(tree: &SyntaxTree, node: NodeId) -> String {
        let mut printer = Self::new();
        tree.accept(node, &mut printer, 0);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Visitor<usize> for OutlinePrinter {
    type Output = ();

    fn visit_children(&mut self, tree: &SyntaxTree, node: NodeId, depth: usize) {
        let data = &tree[node];
        let role = match data.role() {
            Some(role) if depth > 0 => format!("{}: ", role),
            _ => String::new(),
        };
        let start = tree.start_location(node);
        let range = if start.is_empty() {
            String::new()
        } else {
            format!(" @{}-{}", start, tree.end_location(node))
        };
        let indent = "  ".repeat(depth);
        self.output.push_str(&format!("{indent}{role}{}{range}\n", data.kind()));

        for child in tree.children(node) {
            tree.accept(child, self, depth + 1);
        }
    }
}
