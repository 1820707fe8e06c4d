//! Child, ancestor and descendant enumeration.
//!
//! [`Children`] borrows the tree and is the everyday way to read a child list.
//! [`ChildWalker`] holds no borrow between steps, so the caller may mutate the tree
//! while walking: the successor is captured before each node is handed out.

use super::node_types::{NodeId, NodeType};
use super::tree::SyntaxTree;
use crate::ir::role::Role;

/// Direct children in document order, optionally restricted to one role.
#[derive(Debug, Clone)]
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
    role: Option<&'static Role>,
}

impl<'t> Iterator for Children<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let current = self.next?;
            let data = &self.tree[current];
            self.next = data.next_sibling();
            match self.role {
                Some(role) if !data.role().is_some_and(|own| own == role) => continue,
                _ => return Some(current),
            }
        }
    }
}

/// Removal-tolerant cursor over the direct children of one parent.
///
/// Removing or replacing the node just returned never disturbs the walk. If the
/// captured successor is removed before it is reached, the walk resumes after the
/// last returned node, so the removed node is skipped. When both are gone the walk ends.
#[derive(Debug, Clone)]
pub struct ChildWalker {
    parent: NodeId,
    role: Option<&'static Role>,
    last: Option<NodeId>,
    next: Option<NodeId>,
}

impl ChildWalker {
    pub fn new(tree: &SyntaxTree, parent: NodeId) -> Self {
        ChildWalker {
            parent,
            role: None,
            last: None,
            next: tree[parent].first_child(),
        }
    }

    pub fn of_role(tree: &SyntaxTree, parent: NodeId, role: &'static Role) -> Self {
        ChildWalker { role: Some(role), ..Self::new(tree, parent) }
    }

    pub fn next(&mut self, tree: &SyntaxTree) -> Option<NodeId> {
        loop {
            let candidate = match self.next {
                Some(next) if tree.parent(next) == Some(self.parent) => next,
                Some(_) => self
                    .last
                    .filter(|last| tree.parent(*last) == Some(self.parent))
                    .and_then(|last| tree[last].next_sibling())?,
                None => return None,
            };
            self.last = Some(candidate);
            self.next = tree[candidate].next_sibling();
            match self.role {
                Some(role) if !tree[candidate].role().is_some_and(|own| own == role) => continue,
                _ => return Some(candidate),
            }
        }
    }
}

/// Parent chain of a node, nearest first, excluding the node itself.
#[derive(Debug, Clone)]
pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order walk of a subtree, excluding its root.
#[derive(Debug, Clone)]
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl<'t> Descendants<'t> {
    fn successor(&self, current: NodeId) -> Option<NodeId> {
        if let Some(child) = self.tree[current].first_child() {
            return Some(child);
        }
        let mut node = current;
        while node != self.root {
            if let Some(sibling) = self.tree[node].next_sibling() {
                return Some(sibling);
            }
            node = self.tree.parent(node)?;
        }
        None
    }
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

impl SyntaxTree {
    /// Every direct child of `parent`, whatever its role.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children { tree: self, next: self[parent].first_child(), role: None }
    }

    /// Direct children of `parent` attached under `role`.
    pub fn children_of_role(&self, parent: NodeId, role: &'static Role) -> Children<'_> {
        Children { tree: self, next: self[parent].first_child(), role: Some(role) }
    }

    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(node) }
    }

    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants { tree: self, root: node, next: self[node].first_child() }
    }

    /// Nearest ancestor of the given type.
    pub fn ancestor_of_type(&self, node: NodeId, node_type: NodeType) -> Option<NodeId> {
        self.ancestors(node).find(|&ancestor| self[ancestor].node_type() == node_type)
    }
}
