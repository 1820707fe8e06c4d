use super::node_types::{NodeId, Position};
use super::tree::SyntaxTree;

impl SyntaxTree {
    /// Start of `node` in the source: its own span when it is a positioned leaf,
    /// otherwise the start of its first child, or [`Position::EMPTY`] when childless.
    pub fn start_location(&self, node: NodeId) -> Position {
        let data = &self[node];
        if let Some(span) = data.span() {
            return span.start;
        }
        match data.first_child() {
            Some(child) => self.start_location(child),
            None => Position::EMPTY,
        }
    }

    /// End of `node`, mirrored on the last child.
    pub fn end_location(&self, node: NodeId) -> Position {
        let data = &self[node];
        if let Some(span) = data.span() {
            return span.end;
        }
        match data.last_child() {
            Some(child) => self.end_location(child),
            None => Position::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::role::{LEFT, RIGHT};
    use crate::ir::syntax_node::{BinaryOperator, NodeId, NodeKind, Position, Span, SyntaxTree};

    #[test]
    fn test_locations_delegate_to_outer_children() {
        let mut tree = SyntaxTree::new();
        let cmp = tree.create(NodeKind::BinaryOperatorExpression {
            operator: BinaryOperator::LessThan,
        });
        let x = tree.create(NodeKind::IdentifierExpression { name: "x".into() });
        let ten = tree.create(NodeKind::IdentifierExpression { name: "ten".into() });
        tree.set_span(x, Span::new(Position::new(1, 13), Position::new(1, 14))).unwrap();
        tree.set_span(ten, Span::new(Position::new(1, 17), Position::new(1, 20))).unwrap();
        tree.add_child(cmp, x, &LEFT).unwrap();
        tree.add_child(cmp, ten, &RIGHT).unwrap();

        assert_eq!(tree.start_location(cmp), Position::new(1, 13));
        assert_eq!(tree.end_location(cmp), Position::new(1, 20));
    }

    #[test]
    fn test_childless_and_null_nodes_have_empty_location() {
        let mut tree = SyntaxTree::new();
        let block = tree.create(NodeKind::BlockStatement);
        assert!(tree.start_location(block).is_empty());
        assert!(tree.end_location(block).is_empty());
        assert_eq!(tree.start_location(NodeId::null_expression()), Position::EMPTY);
    }
}
