use crate::ir::expressions::{
    AssignmentExpression, BinaryOperatorExpression, IdentifierExpression, PrimitiveExpression,
    UnaryOperatorExpression,
};
use crate::ir::statements::{BlockStatement, ExpressionStatement, ForStatement};
use crate::ir::syntax_node::{ChildWalker, NodeId, NodeKind, SyntaxTree};

/// Double-dispatch target for [`SyntaxTree::accept`].
///
/// `C` is a caller-chosen context passed down with every call, `Output` the value each
/// visit produces. Every `visit_*` method defaults to [`visit_children`](Visitor::visit_children),
/// so an implementor only overrides the kinds it cares about.
pub trait Visitor<C: Clone>: Sized {
    type Output: Default;

    fn visit_block_statement(
        &mut self,
        tree: &SyntaxTree,
        node: BlockStatement,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_expression_statement(
        &mut self,
        tree: &SyntaxTree,
        node: ExpressionStatement,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_for_statement(
        &mut self,
        tree: &SyntaxTree,
        node: ForStatement,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_identifier_expression(
        &mut self,
        tree: &SyntaxTree,
        node: IdentifierExpression,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_primitive_expression(
        &mut self,
        tree: &SyntaxTree,
        node: PrimitiveExpression,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_assignment_expression(
        &mut self,
        tree: &SyntaxTree,
        node: AssignmentExpression,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_binary_operator_expression(
        &mut self,
        tree: &SyntaxTree,
        node: BinaryOperatorExpression,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    fn visit_unary_operator_expression(
        &mut self,
        tree: &SyntaxTree,
        node: UnaryOperatorExpression,
        context: C,
    ) -> Self::Output {
        self.visit_children(tree, node.id(), context)
    }

    /// Dispatches every direct child of `node` with a copy of `context`, then
    /// returns the default output.
    fn visit_children(&mut self, tree: &SyntaxTree, node: NodeId, context: C) -> Self::Output {
        let mut walker = ChildWalker::new(tree, node);
        while let Some(child) = walker.next(tree) {
            tree.accept(child, self, context.clone());
        }
        Self::Output::default()
    }
}

impl SyntaxTree {
    /// Forwards `node` to the visit method for its kind. The null sentinels answer
    /// with `V::Output::default()` and never reach the visitor.
    pub fn accept<C, V>(&self, node: NodeId, visitor: &mut V, context: C) -> V::Output
    where
        C: Clone,
        V: Visitor<C>,
    {
        match self.kind(node) {
            NodeKind::NullStatement | NodeKind::NullExpression => V::Output::default(),
            NodeKind::BlockStatement => {
                visitor.visit_block_statement(self, BlockStatement(node), context)
            }
            NodeKind::ExpressionStatement => {
                visitor.visit_expression_statement(self, ExpressionStatement(node), context)
            }
            NodeKind::ForStatement => {
                visitor.visit_for_statement(self, ForStatement(node), context)
            }
            NodeKind::IdentifierExpression { .. } => {
                visitor.visit_identifier_expression(self, IdentifierExpression(node), context)
            }
            NodeKind::PrimitiveExpression { .. } => {
                visitor.visit_primitive_expression(self, PrimitiveExpression(node), context)
            }
            NodeKind::AssignmentExpression { .. } => {
                visitor.visit_assignment_expression(self, AssignmentExpression(node), context)
            }
            NodeKind::BinaryOperatorExpression { .. } => {
                let node = BinaryOperatorExpression(node);
                visitor.visit_binary_operator_expression(self, node, context)
            }
            NodeKind::UnaryOperatorExpression { .. } => {
                let node = UnaryOperatorExpression(node);
                visitor.visit_unary_operator_expression(self, node, context)
            }
        }
    }
}
