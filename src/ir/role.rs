//! Typed child slots.
//!
//! A [`Role`] names one relationship between a parent and its children
//! ("the condition of a loop", "a statement of a block"). Roles are declared once
//! as `static` items and shared by every tree; two roles are equal only when they
//! are the same static, so roles with the same name never collide.

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::statements::{FOR_INITIALIZER, FOR_ITERATOR};
use super::syntax_node::{NodeCategory, NodeId, NodeKind};

/// Descriptor of a named, category-constrained child slot.
pub struct Role {
    name: &'static str,
    category: NodeCategory,
    validator: Option<fn(&NodeKind) -> bool>,
}

impl Role {
    /// A role accepting any non-null node of `category`.
    pub const fn new(name: &'static str, category: NodeCategory) -> Self {
        Role { name, category, validator: None }
    }

    /// A role with its own occupancy rule. The rule replaces the category check.
    pub const fn with_validator(
        name: &'static str,
        category: NodeCategory,
        validator: fn(&NodeKind) -> bool,
    ) -> Self {
        Role { name, category, validator: Some(validator) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    /// Sentinel handed back when the slot is empty.
    pub fn default_null(&self) -> NodeId {
        self.category.null()
    }

    /// Whether a node of `kind` may occupy this slot.
    pub fn is_valid(&self, kind: &NodeKind) -> bool {
        match self.validator {
            Some(validator) => validator(kind),
            None => !kind.is_null() && kind.category() == self.category,
        }
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Role {}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role({}: {})", self.name, self.category)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn is_assignable(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::IdentifierExpression { .. })
}

/// A statement inside a block.
pub static STATEMENT: Role = Role::new("Statement", NodeCategory::Statement);
/// The single statement a loop or branch runs.
pub static EMBEDDED_STATEMENT: Role = Role::new("EmbeddedStatement", NodeCategory::Statement);
pub static CONDITION: Role = Role::new("Condition", NodeCategory::Expression);
pub static EXPRESSION: Role = Role::new("Expression", NodeCategory::Expression);
pub static LEFT: Role = Role::new("Left", NodeCategory::Expression);
pub static RIGHT: Role = Role::new("Right", NodeCategory::Expression);
pub static OPERAND: Role = Role::new("Operand", NodeCategory::Expression);
/// Left-hand side of an assignment. Only identifiers are assignable.
pub static TARGET: Role = Role::with_validator("Target", NodeCategory::Expression, is_assignable);

static ALL_ROLES: [&Role; 10] = [
    &STATEMENT,
    &EMBEDDED_STATEMENT,
    &CONDITION,
    &EXPRESSION,
    &LEFT,
    &RIGHT,
    &OPERAND,
    &TARGET,
    &FOR_INITIALIZER,
    &FOR_ITERATOR,
];

static REGISTRY: Lazy<FxHashMap<&'static str, &'static Role>> =
    Lazy::new(|| ALL_ROLES.iter().map(|role| (role.name(), *role)).collect());

/// Every built-in role, in declaration order.
pub fn all() -> &'static [&'static Role] {
    &ALL_ROLES
}

/// Resolves a built-in role by its diagnostic name.
pub fn lookup(name: &str) -> Option<&'static Role> {
    REGISTRY.get(name).copied()
}
