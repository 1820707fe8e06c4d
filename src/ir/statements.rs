//! Statement kinds: typed handles over [`SyntaxTree`] nodes with role-keyed accessors.

use super::error::TreeError;
use super::role::{CONDITION, EMBEDDED_STATEMENT, EXPRESSION, Role, STATEMENT};
use super::syntax_node::{Children, NodeCategory, NodeId, NodeKind, SyntaxTree};

/// `init` slots of a `for` header. A loop may have several.
pub static FOR_INITIALIZER: Role = Role::new("Initializer", NodeCategory::Statement);
/// `iter` slots of a `for` header, run after every pass.
pub static FOR_ITERATOR: Role = Role::new("Iterator", NodeCategory::Statement);

typed_node!(
    /// `for (initializers; condition; iterators) embedded_statement`
    ForStatement
);

impl ForStatement {
    pub fn new(tree: &mut SyntaxTree) -> Self {
        ForStatement(tree.create(NodeKind::ForStatement))
    }

    pub fn initializers(self, tree: &SyntaxTree) -> Children<'_> {
        tree.children_of_role(self.0, &FOR_INITIALIZER)
    }

    pub fn add_initializer(
        self,
        tree: &mut SyntaxTree,
        statement: NodeId,
    ) -> Result<(), TreeError> {
        tree.add_child(self.0, statement, &FOR_INITIALIZER)
    }

    pub fn set_initializers<I>(self, tree: &mut SyntaxTree, statements: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        tree.set_children_of_role(self.0, &FOR_INITIALIZER, statements)
    }

    /// The loop condition, or the null expression for `for (;;)`.
    pub fn condition(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &CONDITION)
    }

    pub fn set_condition(self, tree: &mut SyntaxTree, condition: NodeId) -> Result<(), TreeError> {
        tree.set_child_of_role(self.0, &CONDITION, condition)
    }

    pub fn iterators(self, tree: &SyntaxTree) -> Children<'_> {
        tree.children_of_role(self.0, &FOR_ITERATOR)
    }

    pub fn add_iterator(self, tree: &mut SyntaxTree, statement: NodeId) -> Result<(), TreeError> {
        tree.add_child(self.0, statement, &FOR_ITERATOR)
    }

    pub fn set_iterators<I>(self, tree: &mut SyntaxTree, statements: I) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        tree.set_children_of_role(self.0, &FOR_ITERATOR, statements)
    }

    pub fn embedded_statement(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &EMBEDDED_STATEMENT)
    }

    pub fn set_embedded_statement(
        self,
        tree: &mut SyntaxTree,
        body: NodeId,
    ) -> Result<(), TreeError> {
        tree.set_child_of_role(self.0, &EMBEDDED_STATEMENT, body)
    }
}

typed_node!(
    /// `{ statements }`
    BlockStatement
);

impl BlockStatement {
    pub fn new(tree: &mut SyntaxTree) -> Self {
        BlockStatement(tree.create(NodeKind::BlockStatement))
    }

    pub fn statements(self, tree: &SyntaxTree) -> Children<'_> {
        tree.children_of_role(self.0, &STATEMENT)
    }

    pub fn add_statement(self, tree: &mut SyntaxTree, statement: NodeId) -> Result<(), TreeError> {
        tree.add_child(self.0, statement, &STATEMENT)
    }
}

typed_node!(
    /// An expression evaluated for its effect: `x++;`
    ExpressionStatement
);

impl ExpressionStatement {
    pub fn new(tree: &mut SyntaxTree, expression: NodeId) -> Result<Self, TreeError> {
        let statement = ExpressionStatement(tree.create(NodeKind::ExpressionStatement));
        tree.add_child(statement.0, expression, &EXPRESSION)?;
        Ok(statement)
    }

    pub fn expression(self, tree: &SyntaxTree) -> NodeId {
        tree.first_child_of_role(self.0, &EXPRESSION)
    }

    pub fn set_expression(
        self,
        tree: &mut SyntaxTree,
        expression: NodeId,
    ) -> Result<(), TreeError> {
        tree.set_child_of_role(self.0, &EXPRESSION, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::expressions::{IdentifierExpression, UnaryOperatorExpression};
    use crate::ir::syntax_node::UnaryOperator;

    #[test]
    fn test_empty_for_has_null_slots() {
        let mut tree = SyntaxTree::new();
        let for_stmt = ForStatement::new(&mut tree);
        assert_eq!(for_stmt.condition(&tree), NodeId::null_expression());
        assert_eq!(for_stmt.embedded_statement(&tree), NodeId::null_statement());
        assert_eq!(for_stmt.initializers(&tree).count(), 0);
    }

    #[test]
    fn test_set_iterators_replaces_previous() {
        let mut tree = SyntaxTree::new();
        let for_stmt = ForStatement::new(&mut tree);
        let x = IdentifierExpression::new(&mut tree, "x");
        let inc =
            UnaryOperatorExpression::new(&mut tree, UnaryOperator::PostIncrement, x.id()).unwrap();
        let old = ExpressionStatement::new(&mut tree, inc.id()).unwrap();
        for_stmt.add_iterator(&mut tree, old.id()).unwrap();

        let y = IdentifierExpression::new(&mut tree, "y");
        let new = ExpressionStatement::new(&mut tree, y.id()).unwrap();
        for_stmt.set_iterators(&mut tree, [new.id()]).unwrap();

        assert_eq!(for_stmt.iterators(&tree).collect::<Vec<_>>(), vec![new.id()]);
        assert_eq!(tree.parent(old.id()), None);
    }

    #[test]
    fn test_cast_checks_kind() {
        let mut tree = SyntaxTree::new();
        let block = BlockStatement::new(&mut tree);
        assert_eq!(BlockStatement::cast(&tree, block.id()), Some(block));
        assert_eq!(ForStatement::cast(&tree, block.id()), None);
        assert_eq!(BlockStatement::cast(&tree, NodeId::null_statement()), None);
    }

    #[test]
    fn test_block_statements_keep_order() {
        let mut tree = SyntaxTree::new();
        let block = BlockStatement::new(&mut tree);
        let inner: Vec<NodeId> = (0..3).map(|_| BlockStatement::new(&mut tree).id()).collect();
        for &stmt in &inner {
            block.add_statement(&mut tree, stmt).unwrap();
        }
        assert_eq!(block.statements(&tree).collect::<Vec<_>>(), inner);
    }
}
