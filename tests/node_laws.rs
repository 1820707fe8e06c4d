//! Null-object behavior, ownership rules and role typing, exercised through the public API.

use syntax_node::ir::error::TreeError;
use syntax_node::ir::expressions::{AssignmentExpression, IdentifierExpression, PrimitiveExpression};
use syntax_node::ir::role;
use syntax_node::ir::statements::{BlockStatement, ExpressionStatement, ForStatement};
use syntax_node::ir::syntax_node::{
    AssignmentOperator, Literal, NodeCategory, NodeId, NodeKind, SyntaxTree,
};
use syntax_node::ir::visitor::Visitor;

/// Counts every dispatch it receives.
#[derive(Default)]
struct Counter {
    calls: usize,
}

impl Visitor<()> for Counter {
    type Output = u32;

    fn visit_children(&mut self, _tree: &SyntaxTree, _node: NodeId, _context: ()) -> u32 {
        self.calls += 1;
        1
    }
}

#[test]
fn test_sentinels_report_null() {
    let tree = SyntaxTree::new();
    for category in [NodeCategory::Statement, NodeCategory::Expression] {
        let sentinel = category.null();
        assert!(sentinel.is_null());
        assert!(tree.is_null(sentinel));
        assert_eq!(tree.kind(sentinel).category(), category);
        assert_eq!(tree.parent(sentinel), None);
        assert_eq!(tree.children(sentinel).count(), 0);
    }
}

#[test]
fn test_sentinels_are_shared_between_trees() {
    let mut first = SyntaxTree::new();
    let mut second = SyntaxTree::new();
    assert_eq!(first.create(NodeKind::NullStatement), second.create(NodeKind::NullStatement));
    assert_eq!(first.create(NodeKind::NullExpression), NodeId::null_expression());
    assert!(first.is_empty());
}

#[test]
fn test_dispatch_on_sentinel_has_no_side_effects() {
    let tree = SyntaxTree::new();
    let mut counter = Counter::default();
    assert_eq!(tree.accept(NodeId::null_statement(), &mut counter, ()), 0);
    assert_eq!(tree.accept(NodeId::null_expression(), &mut counter, ()), 0);
    assert_eq!(counter.calls, 0);
}

#[test]
fn test_adding_a_sentinel_is_a_no_op() {
    let mut tree = SyntaxTree::new();
    let block = BlockStatement::new(&mut tree);
    let first = BlockStatement::new(&mut tree);
    block.add_statement(&mut tree, first.id()).unwrap();

    tree.add_child(block.id(), NodeId::null_statement(), &role::STATEMENT).unwrap();
    let sentinel = NodeId::null_statement();
    tree.insert_child_before(block.id(), Some(first.id()), sentinel, &role::STATEMENT)
        .unwrap();
    tree.insert_child_after(block.id(), None, NodeId::null_expression(), &role::STATEMENT)
        .unwrap();
    assert_eq!(block.statements(&tree).collect::<Vec<_>>(), vec![first.id()]);
}

#[test]
fn test_sentinel_cannot_receive_children() {
    let mut tree = SyntaxTree::new();
    let block = BlockStatement::new(&mut tree);
    let err = tree
        .add_child(NodeId::null_statement(), block.id(), &role::STATEMENT)
        .unwrap_err();
    assert_eq!(err, TreeError::NullReceiver { node: NodeId::null_statement() });
    assert_eq!(tree.parent(block.id()), None);
}

#[test]
fn test_empty_slot_reads_as_role_sentinel() {
    let mut tree = SyntaxTree::new();
    let lp = ForStatement::new(&mut tree);
    assert_eq!(lp.condition(&tree), NodeId::null_expression());
    assert_eq!(lp.embedded_statement(&tree), NodeId::null_statement());

    let x = IdentifierExpression::new(&mut tree, "x");
    lp.set_condition(&mut tree, x.id()).unwrap();
    assert_eq!(lp.condition(&tree), x.id());

    tree.remove(x.id()).unwrap();
    assert_eq!(lp.condition(&tree), NodeId::null_expression());
    assert_eq!(tree.children(lp.id()).count(), 0);
}

#[test]
fn test_attached_node_cannot_be_adopted_twice() {
    let mut tree = SyntaxTree::new();
    let a = BlockStatement::new(&mut tree);
    let b = BlockStatement::new(&mut tree);
    let child = BlockStatement::new(&mut tree);
    a.add_statement(&mut tree, child.id()).unwrap();

    let err = b.add_statement(&mut tree, child.id()).unwrap_err();
    assert_eq!(err, TreeError::AlreadyAttached { node: child.id() });
    assert_eq!(tree.parent(child.id()), Some(a.id()));
    assert_eq!(b.statements(&tree).count(), 0);

    tree.remove(child.id()).unwrap();
    b.add_statement(&mut tree, child.id()).unwrap();
    assert_eq!(tree.parent(child.id()), Some(b.id()));
}

#[test]
fn test_nodes_do_not_cross_trees() {
    let mut left = SyntaxTree::new();
    let mut right = SyntaxTree::new();
    let owner = BlockStatement::new(&mut left);
    let stranger = BlockStatement::new(&mut right);

    let err = left.add_child(owner.id(), stranger.id(), &role::STATEMENT).unwrap_err();
    assert_eq!(err, TreeError::ForeignNode { node: stranger.id() });
    assert_eq!(left.children(owner.id()).count(), 0);
    assert_eq!(right.parent(stranger.id()), None);
}

#[test]
fn test_node_cannot_become_its_own_ancestor() {
    let mut tree = SyntaxTree::new();
    let outer = BlockStatement::new(&mut tree);
    let inner = BlockStatement::new(&mut tree);
    outer.add_statement(&mut tree, inner.id()).unwrap();

    let err = inner.add_statement(&mut tree, outer.id()).unwrap_err();
    assert_eq!(err, TreeError::Cycle { parent: inner.id(), node: outer.id() });
    tree.verify().unwrap();
}

#[test]
fn test_replacement_rejected_by_role_leaves_tree_unchanged() {
    let mut tree = SyntaxTree::new();
    let target = IdentifierExpression::new(&mut tree, "x");
    let one = PrimitiveExpression::new(&mut tree, Literal::Int(1));
    let assign =
        AssignmentExpression::new(&mut tree, target.id(), AssignmentOperator::Assign, one.id())
            .unwrap();
    let literal = PrimitiveExpression::new(&mut tree, Literal::Int(2));
    let statement = BlockStatement::new(&mut tree);

    assert!(matches!(
        tree.replace_with(target.id(), literal.id()),
        Err(TreeError::RoleMismatch { role: "Target", .. })
    ));
    assert!(matches!(
        tree.replace_with(one.id(), statement.id()),
        Err(TreeError::RoleMismatch { role: "Right", expected: NodeCategory::Expression, .. })
    ));

    assert_eq!(assign.left(&tree), target.id());
    assert_eq!(assign.right(&tree), one.id());
    assert_eq!(tree.parent(literal.id()), None);
    assert_eq!(tree.parent(statement.id()), None);
    tree.verify().unwrap();
}

#[test]
fn test_plain_add_skips_role_validation() {
    let mut tree = SyntaxTree::new();
    let block = BlockStatement::new(&mut tree);
    let x = IdentifierExpression::new(&mut tree, "x");

    tree.add_child(block.id(), x.id(), &role::STATEMENT).unwrap();
    assert_eq!(tree.parent(x.id()), Some(block.id()));

    let y = IdentifierExpression::new(&mut tree, "y");
    assert!(matches!(
        tree.add_child_checked(block.id(), y.id(), &role::STATEMENT),
        Err(TreeError::RoleMismatch { .. })
    ));
    assert_eq!(tree.parent(y.id()), None);
}

#[test]
fn test_frozen_subtree_rejects_edits() {
    let mut tree = SyntaxTree::new();
    let x = IdentifierExpression::new(&mut tree, "x");
    let statement = ExpressionStatement::new(&mut tree, x.id()).unwrap();
    tree.freeze(statement.id()).unwrap();

    let y = IdentifierExpression::new(&mut tree, "y");
    assert_eq!(
        statement.set_expression(&mut tree, y.id()),
        Err(TreeError::Frozen { node: x.id() })
    );
    assert_eq!(tree.remove(x.id()), Err(TreeError::Frozen { node: x.id() }));

    let copy = tree.deep_clone(statement.id()).unwrap();
    assert!(!tree.is_frozen(copy));
    let copy = ExpressionStatement::cast(&tree, copy).unwrap();
    copy.set_expression(&mut tree, y.id()).unwrap();
    assert_eq!(copy.expression(&tree), y.id());
}
