use std::fmt;

/// Tree id reserved for the shared null sentinels. Real trees start at 1.
pub(crate) const SHARED_TREE: u32 = 0;

/// Handle to a node stored in a [`SyntaxTree`](super::SyntaxTree).
///
/// A handle is the pair (tree, slot). Handles of the shared null sentinels use the
/// reserved tree id, so the same sentinel handle is valid in every tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    tree: u32,
    index: u32,
}

impl NodeId {
    pub(crate) const fn new(tree: u32, index: u32) -> Self {
        NodeId { tree, index }
    }

    /// The shared "absent statement" sentinel.
    pub const fn null_statement() -> Self {
        NodeId::new(SHARED_TREE, 0)
    }

    /// The shared "absent expression" sentinel.
    pub const fn null_expression() -> Self {
        NodeId::new(SHARED_TREE, 1)
    }

    /// True for the shared sentinels only.
    pub const fn is_null(self) -> bool {
        self.tree == SHARED_TREE
    }

    pub(crate) const fn tree(self) -> u32 {
        self.tree
    }

    pub(crate) const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null#{}", self.index)
        } else {
            write!(f, "#{}.{}", self.tree, self.index)
        }
    }
}

/// The slot categories a [`Role`](crate::ir::role::Role) can be parameterised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Statement,
    Expression,
}

impl NodeCategory {
    /// The shared sentinel standing in for an absent node of this category.
    pub const fn null(self) -> NodeId {
        match self {
            NodeCategory::Statement => NodeId::null_statement(),
            NodeCategory::Expression => NodeId::null_expression(),
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCategory::Statement => write!(f, "statement"),
            NodeCategory::Expression => write!(f, "expression"),
        }
    }
}

/// Literal payload of a [`NodeKind::PrimitiveExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Str(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Equality,
    InEquality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    ConditionalAnd,
    ConditionalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Minus,
    Increment,
    Decrement,
    PostIncrement,
    PostDecrement,
}

impl AssignmentOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
        }
    }
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::Equality => "==",
            BinaryOperator::InEquality => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::ConditionalAnd => "&&",
            BinaryOperator::ConditionalOr => "||",
        }
    }
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
            UnaryOperator::Increment | UnaryOperator::PostIncrement => "++",
            UnaryOperator::Decrement | UnaryOperator::PostDecrement => "--",
        }
    }

    /// Postfix operators print after their operand (`x++`).
    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOperator::PostIncrement | UnaryOperator::PostDecrement)
    }
}

/// Every concrete construct a node can be, with its inline payload.
///
/// The null variants are only ever held by the shared sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    NullStatement,
    NullExpression,
    /// `{ ... }`
    BlockStatement,
    /// An expression used as a statement (`x++;`).
    ExpressionStatement,
    /// `for (init; cond; iter) body`
    ForStatement,
    IdentifierExpression { name: String },
    PrimitiveExpression { value: Literal },
    AssignmentExpression { operator: AssignmentOperator },
    BinaryOperatorExpression { operator: BinaryOperator },
    UnaryOperatorExpression { operator: UnaryOperator },
}

impl NodeKind {
    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::NullStatement
            | NodeKind::BlockStatement
            | NodeKind::ExpressionStatement
            | NodeKind::ForStatement => NodeCategory::Statement,
            NodeKind::NullExpression
            | NodeKind::IdentifierExpression { .. }
            | NodeKind::PrimitiveExpression { .. }
            | NodeKind::AssignmentExpression { .. }
            | NodeKind::BinaryOperatorExpression { .. }
            | NodeKind::UnaryOperatorExpression { .. } => NodeCategory::Expression,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NodeKind::NullStatement | NodeKind::NullExpression)
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::NullStatement => NodeType::NullStatement,
            NodeKind::NullExpression => NodeType::NullExpression,
            NodeKind::BlockStatement => NodeType::BlockStatement,
            NodeKind::ExpressionStatement => NodeType::ExpressionStatement,
            NodeKind::ForStatement => NodeType::ForStatement,
            NodeKind::IdentifierExpression { .. } => NodeType::IdentifierExpression,
            NodeKind::PrimitiveExpression { .. } => NodeType::PrimitiveExpression,
            NodeKind::AssignmentExpression { .. } => NodeType::AssignmentExpression,
            NodeKind::BinaryOperatorExpression { .. } => NodeType::BinaryOperatorExpression,
            NodeKind::UnaryOperatorExpression { .. } => NodeType::UnaryOperatorExpression,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::IdentifierExpression { name } => write!(f, "{} {}", self.node_type(), name),
            NodeKind::PrimitiveExpression { value } => write!(f, "{} {}", self.node_type(), value),
            NodeKind::AssignmentExpression { operator } => {
                write!(f, "{} {}", self.node_type(), operator.symbol())
            }
            NodeKind::BinaryOperatorExpression { operator } => {
                write!(f, "{} {}", self.node_type(), operator.symbol())
            }
            NodeKind::UnaryOperatorExpression { operator } => {
                write!(f, "{} {}", self.node_type(), operator.symbol())
            }
            _ => write!(f, "{}", self.node_type()),
        }
    }
}

/// Payload-free discriminator of [`NodeKind`], used for pattern matching and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    NullStatement,
    NullExpression,
    BlockStatement,
    ExpressionStatement,
    ForStatement,
    IdentifierExpression,
    PrimitiveExpression,
    AssignmentExpression,
    BinaryOperatorExpression,
    UnaryOperatorExpression,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::NullStatement => write!(f, "NullStatement"),
            NodeType::NullExpression => write!(f, "NullExpression"),
            NodeType::BlockStatement => write!(f, "BlockStatement"),
            NodeType::ExpressionStatement => write!(f, "ExpressionStatement"),
            NodeType::ForStatement => write!(f, "ForStatement"),
            NodeType::IdentifierExpression => write!(f, "IdentifierExpression"),
            NodeType::PrimitiveExpression => write!(f, "PrimitiveExpression"),
            NodeType::AssignmentExpression => write!(f, "AssignmentExpression"),
            NodeType::BinaryOperatorExpression => write!(f, "BinaryOperatorExpression"),
            NodeType::UnaryOperatorExpression => write!(f, "UnaryOperatorExpression"),
        }
    }
}

/// A 1-based source position. Line 0 marks the empty location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const EMPTY: Position = Position { line: 0, column: 0 };

    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    pub fn is_empty(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range of a leaf node, recorded by whoever built it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_display() {
        assert_eq!(NodeType::ForStatement.to_string(), "ForStatement");
        assert_eq!(
            NodeKind::IdentifierExpression { name: "x".into() }.to_string(),
            "IdentifierExpression x"
        );
        assert_eq!(
            NodeKind::UnaryOperatorExpression {
                operator: UnaryOperator::PostIncrement
            }
            .to_string(),
            "UnaryOperatorExpression ++"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(NodeKind::ForStatement.category(), NodeCategory::Statement);
        assert_eq!(NodeKind::NullExpression.category(), NodeCategory::Expression);
        assert_eq!(NodeCategory::Expression.null(), NodeId::null_expression());
        assert!(NodeKind::NullStatement.is_null());
        assert!(!NodeKind::BlockStatement.is_null());
    }

    #[test]
    fn test_null_handles_are_tree_independent() {
        assert!(NodeId::null_statement().is_null());
        assert_ne!(NodeId::null_statement(), NodeId::null_expression());
        assert!(!NodeId::new(3, 0).is_null());
        assert_eq!(NodeId::new(3, 7).to_string(), "#3.7");
    }

    #[test]
    fn test_empty_position() {
        assert!(Position::EMPTY.is_empty());
        assert!(!Position::new(1, 1).is_empty());
        assert!(Position::new(1, 4) < Position::new(2, 1));
    }
}
