//! Builds `for (x = 0; x < 10; x++) {}` by hand and checks how it reads back.

use syntax_node::ir::expressions::{
    AssignmentExpression, BinaryOperatorExpression, IdentifierExpression, PrimitiveExpression,
    UnaryOperatorExpression,
};
use syntax_node::ir::role;
use syntax_node::ir::statements::{
    BlockStatement, ExpressionStatement, FOR_INITIALIZER, FOR_ITERATOR, ForStatement,
};
use syntax_node::ir::syntax_node::{
    AssignmentOperator, BinaryOperator, Literal, NodeId, NodeType, SyntaxTree, UnaryOperator,
};
use syntax_node::ir::visitor::Visitor;

struct Loop {
    node: ForStatement,
    initializer: NodeId,
    condition: NodeId,
    iterator: NodeId,
    body: NodeId,
}

fn build(tree: &mut SyntaxTree) -> Loop {
    let node = ForStatement::new(tree);

    let x = IdentifierExpression::new(tree, "x");
    let zero = PrimitiveExpression::new(tree, Literal::Int(0));
    let assign =
        AssignmentExpression::new(tree, x.id(), AssignmentOperator::Assign, zero.id()).unwrap();
    let initializer = ExpressionStatement::new(tree, assign.id()).unwrap().id();
    node.add_initializer(tree, initializer).unwrap();

    let x = IdentifierExpression::new(tree, "x");
    let ten = PrimitiveExpression::new(tree, Literal::Int(10));
    let condition = BinaryOperatorExpression::new(tree, x.id(), BinaryOperator::LessThan, ten.id())
        .unwrap()
        .id();
    node.set_condition(tree, condition).unwrap();

    let x = IdentifierExpression::new(tree, "x");
    let increment =
        UnaryOperatorExpression::new(tree, UnaryOperator::PostIncrement, x.id()).unwrap();
    let iterator = ExpressionStatement::new(tree, increment.id()).unwrap().id();
    node.add_iterator(tree, iterator).unwrap();

    let body = BlockStatement::new(tree).id();
    node.set_embedded_statement(tree, body).unwrap();

    Loop { node, initializer, condition, iterator, body }
}

#[test]
fn test_direct_children_in_document_order() {
    let mut tree = SyntaxTree::new();
    let lp = build(&mut tree);

    let children: Vec<NodeId> = tree.children(lp.node.id()).collect();
    assert_eq!(children, vec![lp.initializer, lp.condition, lp.iterator, lp.body]);
    tree.verify().unwrap();
}

#[test]
fn test_each_child_reachable_through_its_role() {
    let mut tree = SyntaxTree::new();
    let lp = build(&mut tree);

    assert_eq!(lp.node.initializers(&tree).collect::<Vec<_>>(), vec![lp.initializer]);
    assert_eq!(lp.node.condition(&tree), lp.condition);
    assert_eq!(lp.node.iterators(&tree).collect::<Vec<_>>(), vec![lp.iterator]);
    assert_eq!(lp.node.embedded_statement(&tree), lp.body);

    assert_eq!(tree.role(lp.initializer), Some(&FOR_INITIALIZER));
    assert_eq!(tree.role(lp.condition), Some(&role::CONDITION));
    assert_eq!(tree.role(lp.iterator), Some(&FOR_ITERATOR));
    assert_eq!(tree.role(lp.body), Some(&role::EMBEDDED_STATEMENT));
}

#[test]
fn test_payloads_survive_construction() {
    let mut tree = SyntaxTree::new();
    let lp = build(&mut tree);

    let condition = BinaryOperatorExpression::cast(&tree, lp.condition).unwrap();
    assert_eq!(condition.operator(&tree), BinaryOperator::LessThan);
    let bound = PrimitiveExpression::cast(&tree, condition.right(&tree)).unwrap();
    assert_eq!(bound.value(&tree), &Literal::Int(10));

    let step = ExpressionStatement::cast(&tree, lp.iterator).unwrap().expression(&tree);
    let step = UnaryOperatorExpression::cast(&tree, step).unwrap();
    assert_eq!(step.operator(&tree), UnaryOperator::PostIncrement);
    let counter = IdentifierExpression::cast(&tree, step.operand(&tree)).unwrap();
    assert_eq!(counter.name(&tree), "x");
}

/// Answers loops with a marker built from the context, everything else with nothing.
struct LoopMarker {
    seen: Vec<NodeId>,
}

impl Visitor<&'static str> for LoopMarker {
    type Output = Option<String>;

    fn visit_for_statement(
        &mut self,
        _tree: &SyntaxTree,
        node: ForStatement,
        context: &'static str,
    ) -> Option<String> {
        self.seen.push(node.id());
        Some(format!("loop:{}", context))
    }
}

#[test]
fn test_dispatch_routes_to_for_statement() {
    let mut tree = SyntaxTree::new();
    let lp = build(&mut tree);

    let mut marker = LoopMarker { seen: Vec::new() };
    let result = tree.accept(lp.node.id(), &mut marker, "ctx");
    assert_eq!(result.as_deref(), Some("loop:ctx"));
    assert_eq!(marker.seen, vec![lp.node.id()]);
}

#[test]
fn test_dispatch_on_other_kinds_takes_default_path() {
    let mut tree = SyntaxTree::new();
    let lp = build(&mut tree);

    let mut marker = LoopMarker { seen: Vec::new() };
    assert_eq!(tree.accept(lp.body, &mut marker, "ctx"), None);
    assert!(marker.seen.is_empty());
}

#[test]
fn test_replacing_the_loop_keeps_its_slot() {
    let mut tree = SyntaxTree::new();
    let block = BlockStatement::new(&mut tree);
    let lp = build(&mut tree);
    block.add_statement(&mut tree, lp.node.id()).unwrap();

    let wrapper = tree
        .replace_with_fn(lp.node.id(), |tree, inner| {
            let wrapper = BlockStatement::new(tree);
            wrapper.add_statement(tree, inner)?;
            Ok(wrapper.id())
        })
        .unwrap();

    assert_eq!(block.statements(&tree).collect::<Vec<_>>(), vec![wrapper]);
    assert_eq!(tree.ancestor_of_type(lp.condition, NodeType::BlockStatement), Some(wrapper));
    tree.verify().unwrap();
}
