//! Expression kinds used by the loop header and its statements.

use super::error::TreeError;
use super::role::{LEFT, OPERAND, RIGHT, TARGET};
use super::syntax_node::{
    AssignmentOperator, BinaryOperator, Literal, NodeId, NodeKind, SyntaxTree, UnaryOperator,
};

typed_node!(
    /// A name reference: `x`
    IdentifierExpression
);

impl IdentifierExpression {
    pub fn new(tree: &mut SyntaxTree, name: impl Into<String>) -> Self {
        IdentifierExpression(tree.create(NodeKind::IdentifierExpression { name: name.into() }))
    }

    pub fn name(self, tree: &SyntaxTree) -> &str {
        match tree.kind(self.0) {
            NodeKind::IdentifierExpression { name } => name,
            _ => unreachable!(),
        }
    }
}

typed_node!(
    /// A literal: `0`, `true`, `"s"`
    PrimitiveExpression
);

impl PrimitiveExpression {
    pub fn new(tree: &mut SyntaxTree, value: Literal) -> Self {
        PrimitiveExpression(tree.create(NodeKind::PrimitiveExpression { value }))
    }

    pub fn value(self, tree: &SyntaxTree) -> &Literal {
        match tree.kind(self.0) {
            NodeKind::PrimitiveExpression { value } => value,
            _ => unreachable!(),
        }
    }
}

typed_node!(
    /// `left op= right`. The left side sits in the [`TARGET`] role, which only
    /// accepts identifiers when a node is swapped in.
    AssignmentExpression
);

impl AssignmentExpression {
    pub fn new(
        tree: &mut SyntaxTree,
        left: NodeId,
        operator: AssignmentOperator,
        right: NodeId,
    ) -> Result<Self, TreeError> {
        let node = AssignmentExpression(tree.create(NodeKind::AssignmentExpression { operator }));
        tree.add_child(node.0, left, &TARGET)?;
        tree.add_child(node.0, right, &RIGHT)?;
        Ok(node)
    }

    pub fn operator(self, tree: &SyntaxTree) -> AssignmentOperator {
        match tree.kind(self.0) {
            NodeKind::AssignmentExpression { operator } => *operator,
            _ => unreachable!(),
        }
    }

    pub fn left(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &TARGET)
    }

    pub fn set_left(self, tree: &mut SyntaxTree, left: NodeId) -> Result<(), TreeError> {
        tree.set_child_of_role(self.0, &TARGET, left)
    }

    pub fn right(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &RIGHT)
    }

    pub fn set_right(self, tree: &mut SyntaxTree, right: NodeId) -> Result<(), TreeError> {
        tree.set_child_of_role(self.0, &RIGHT, right)
    }
}

typed_node!(
    /// `left op right`
    BinaryOperatorExpression
);

impl BinaryOperatorExpression {
    pub fn new(
        tree: &mut SyntaxTree,
        left: NodeId,
        operator: BinaryOperator,
        right: NodeId,
    ) -> Result<Self, TreeError> {
        let node =
            BinaryOperatorExpression(tree.create(NodeKind::BinaryOperatorExpression { operator }));
        tree.add_child(node.0, left, &LEFT)?;
        tree.add_child(node.0, right, &RIGHT)?;
        Ok(node)
    }

    pub fn operator(self, tree: &SyntaxTree) -> BinaryOperator {
        match tree.kind(self.0) {
            NodeKind::BinaryOperatorExpression { operator } => *operator,
            _ => unreachable!(),
        }
    }

    pub fn left(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &LEFT)
    }

    pub fn right(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &RIGHT)
    }
}

typed_node!(
    /// `op operand` or `operand op` for the postfix forms.
    UnaryOperatorExpression
);

impl UnaryOperatorExpression {
    pub fn new(
        tree: &mut SyntaxTree,
        operator: UnaryOperator,
        operand: NodeId,
    ) -> Result<Self, TreeError> {
        let node =
            UnaryOperatorExpression(tree.create(NodeKind::UnaryOperatorExpression { operator }));
        tree.add_child(node.0, operand, &OPERAND)?;
        Ok(node)
    }

    pub fn operator(self, tree: &SyntaxTree) -> UnaryOperator {
        match tree.kind(self.0) {
            NodeKind::UnaryOperatorExpression { operator } => *operator,
            _ => unreachable!(),
        }
    }

    pub fn operand(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &OPERAND)
    }
}
