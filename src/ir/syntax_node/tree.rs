use std::ops::Index;
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::node_types::{NodeId, NodeKind, NodeType, SHARED_TREE, Span};
use crate::ir::error::TreeError;
use crate::ir::role::Role;

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(SHARED_TREE + 1);

/// Linkage record of one node.
///
/// Children are owned by the arena; `parent` and the sibling links are plain handles.
#[derive(Debug, Clone)]
pub struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    role: Option<&'static Role>,
    span: Option<Span>,
    frozen: bool,
}

impl NodeData {
    fn detached(kind: NodeKind) -> Self {
        NodeData {
            kind,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            role: None,
            span: None,
            frozen: false,
        }
    }

    const fn sentinel(kind: NodeKind) -> Self {
        NodeData {
            kind,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            role: None,
            span: None,
            frozen: true,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_null(&self) -> bool {
        self.kind.is_null()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    /// Role under which this node hangs off its parent.
    pub fn role(&self) -> Option<&'static Role> {
        self.role
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn has_role(&self, role: &Role) -> bool {
        self.role.is_some_and(|own| own == role)
    }
}

/// The shared sentinels, indexed by `NodeId::index()`.
static NULL_NODES: [NodeData; 2] = [
    NodeData::sentinel(NodeKind::NullStatement),
    NodeData::sentinel(NodeKind::NullExpression),
];

/// Arena holding every node of one syntax tree (and any detached fragments built for it).
///
/// Nodes are never freed individually; removed nodes stay addressable until the
/// tree is dropped, so they can be reattached elsewhere.
#[derive(Debug)]
pub struct SyntaxTree {
    id: u32,
    nodes: Vec<NodeData>,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SyntaxTree {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes allocated in this arena (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every node allocated in this arena, in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(|index| NodeId::new(self.id, index))
    }

    /// Creates a detached node. Null kinds yield the shared sentinel instead of a new node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        match kind {
            NodeKind::NullStatement => NodeId::null_statement(),
            NodeKind::NullExpression => NodeId::null_expression(),
            kind => {
                let id = NodeId::new(self.id, self.nodes.len() as u32);
                self.nodes.push(NodeData::detached(kind));
                id
            }
        }
    }

    /// Looks a handle up, rejecting handles minted by another tree.
    pub fn get(&self, id: NodeId) -> Result<&NodeData, TreeError> {
        if id.is_null() {
            return NULL_NODES.get(id.index()).ok_or(TreeError::ForeignNode { node: id });
        }
        if id.tree() != self.id {
            return Err(TreeError::ForeignNode { node: id });
        }
        self.nodes.get(id.index()).ok_or(TreeError::ForeignNode { node: id })
    }

    /// Mutable access for handles already validated by `get`. Never called with a sentinel.
    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        debug_assert!(!id.is_null() && id.tree() == self.id);
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    pub fn role(&self, id: NodeId) -> Option<&'static Role> {
        self[id].role
    }

    pub fn is_null(&self, id: NodeId) -> bool {
        id.is_null()
    }

    /// First direct child attached under `role`, or the role's sentinel.
    pub fn first_child_of_role(&self, parent: NodeId, role: &'static Role) -> NodeId {
        self.children_of_role(parent, role)
            .next()
            .unwrap_or_else(|| role.default_null())
    }

    /// Appends `child` as the last child of `parent` under `role`.
    ///
    /// Sentinel children are ignored. The role's validity rule is not consulted here;
    /// see [`add_child_checked`](Self::add_child_checked) for the strict variant.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        role: &'static Role,
    ) -> Result<(), TreeError> {
        if child.is_null() {
            return Ok(());
        }
        self.check_attachable(parent, child)?;
        self.check_neighbours(self.nodes[parent.index()].last_child, None)?;
        self.link(parent, None, child, role);
        trace!("added {} under {} as {}", child, parent, role);
        Ok(())
    }

    /// Like [`add_child`](Self::add_child), but also rejects children the role does not accept.
    pub fn add_child_checked(
        &mut self,
        parent: NodeId,
        child: NodeId,
        role: &'static Role,
    ) -> Result<(), TreeError> {
        if !child.is_null() {
            self.check_role(role, child)?;
        }
        self.add_child(parent, child, role)
    }

    /// Inserts `child` right before `anchor`. A missing or null anchor appends.
    pub fn insert_child_before(
        &mut self,
        parent: NodeId,
        anchor: Option<NodeId>,
        child: NodeId,
        role: &'static Role,
    ) -> Result<(), TreeError> {
        let Some(anchor) = anchor.filter(|anchor| !anchor.is_null()) else {
            return self.add_child(parent, child, role);
        };
        if child.is_null() {
            return Ok(());
        }
        self.check_attachable(parent, child)?;
        let anchor_data = self.get(anchor)?;
        if anchor_data.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, anchor });
        }
        self.check_neighbours(anchor_data.prev_sibling, Some(anchor))?;
        self.link(parent, Some(anchor), child, role);
        trace!("inserted {} before {} under {} as {}", child, anchor, parent, role);
        Ok(())
    }

    /// Inserts `child` right after `anchor`. A missing or null anchor inserts at the front.
    pub fn insert_child_after(
        &mut self,
        parent: NodeId,
        anchor: Option<NodeId>,
        child: NodeId,
        role: &'static Role,
    ) -> Result<(), TreeError> {
        if child.is_null() {
            return Ok(());
        }
        let successor = match anchor.filter(|anchor| !anchor.is_null()) {
            Some(anchor) => {
                let anchor_data = self.get(anchor)?;
                if anchor_data.parent != Some(parent) {
                    return Err(TreeError::NotAChild { parent, anchor });
                }
                anchor_data.next_sibling
            }
            None => self.get(parent)?.first_child,
        };
        self.insert_child_before(parent, successor, child, role)
    }

    /// Detaches `node` from its parent. Detached nodes and sentinels are left alone.
    pub fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        if node.is_null() {
            return Ok(());
        }
        let data = self.get(node)?;
        let Some(parent) = data.parent else {
            return Ok(());
        };
        if data.frozen {
            return Err(TreeError::Frozen { node });
        }
        self.check_neighbours(data.prev_sibling, data.next_sibling)?;
        self.unlink(node);
        trace!("removed {} from {}", node, parent);
        Ok(())
    }

    /// Puts `new_node` where `node` is, keeping its parent, role and siblings.
    ///
    /// A null `new_node` degrades to [`remove`](Self::remove). This is the one attach
    /// path that consults the role's validity rule.
    pub fn replace_with(&mut self, node: NodeId, new_node: NodeId) -> Result<(), TreeError> {
        if new_node.is_null() {
            return self.remove(node);
        }
        if node == new_node {
            return Ok(());
        }
        let data = self.get(node)?;
        let new_data = self.get(new_node)?;
        let (Some(parent), Some(role)) = (data.parent, data.role) else {
            return Err(TreeError::NotAttached { node });
        };
        if data.frozen {
            return Err(TreeError::Frozen { node });
        }
        if new_data.frozen {
            return Err(TreeError::Frozen { node: new_node });
        }
        if new_data.parent.is_some() {
            return Err(TreeError::AlreadyAttached { node: new_node });
        }
        self.check_role(role, new_node)?;
        if self.is_ancestor_or_self(new_node, parent) {
            return Err(TreeError::Cycle { parent, node: new_node });
        }
        self.check_neighbours(data.prev_sibling, data.next_sibling)?;

        let successor = data.next_sibling;
        self.unlink(node);
        self.link(parent, successor, new_node, role);
        trace!("replaced {} with {} under {} as {}", node, new_node, parent, role);
        Ok(())
    }

    /// Detaches `node`, hands it to `build`, and puts whatever `build` returns into the
    /// vacated slot. Useful for wrapping a node in a new parent.
    ///
    /// If `build` fails or its result cannot take the slot, every change `build` made
    /// is undone (nodes it allocated included), `node` is back in its slot, and the
    /// error is returned.
    pub fn replace_with_fn<F>(&mut self, node: NodeId, build: F) -> Result<NodeId, TreeError>
    where
        F: FnOnce(&mut SyntaxTree, NodeId) -> Result<NodeId, TreeError>,
    {
        let data = self.get(node)?;
        let (Some(parent), Some(role)) = (data.parent, data.role) else {
            return Err(TreeError::NotAttached { node });
        };
        if data.frozen {
            return Err(TreeError::Frozen { node });
        }
        self.check_neighbours(data.prev_sibling, data.next_sibling)?;
        let successor = data.next_sibling;
        let snapshot = self.nodes.clone();
        self.unlink(node);

        let outcome = build(self, node).and_then(|replacement| {
            if let Some(successor) = successor {
                if self.get(successor)?.parent != Some(parent) {
                    return Err(TreeError::SuccessorMoved { node: successor });
                }
            }
            if !replacement.is_null() {
                self.check_role(role, replacement)?;
                self.check_attachable(parent, replacement)?;
                let predecessor = match successor {
                    Some(successor) => self.nodes[successor.index()].prev_sibling,
                    None => self.nodes[parent.index()].last_child,
                };
                self.check_neighbours(predecessor, successor)?;
                self.link(parent, successor, replacement, role);
            }
            Ok(replacement)
        });

        match outcome {
            Ok(replacement) => {
                trace!("rebuilt {} as {} under {} as {}", node, replacement, parent, role);
                Ok(replacement)
            }
            Err(err) => {
                self.nodes = snapshot;
                debug!("rolled back rebuild of {}: {}", node, err);
                Err(err)
            }
        }
    }

    /// Makes `role` hold exactly `new_child`: replaces the current occupant, appends
    /// when the slot is empty, and clears the slot when `new_child` is a sentinel.
    pub fn set_child_of_role(
        &mut self,
        parent: NodeId,
        role: &'static Role,
        new_child: NodeId,
    ) -> Result<(), TreeError> {
        self.get(parent)?;
        let existing = self.first_child_of_role(parent, role);
        if existing.is_null() {
            self.add_child(parent, new_child, role)
        } else {
            self.replace_with(existing, new_child)
        }
    }

    /// Replaces every child of `role` with `new_children`, in order.
    ///
    /// The input is collected before anything is touched, and every candidate is
    /// checked up front, so a failure leaves the tree as it was. Candidates may be
    /// current children of the same role (reordering).
    pub fn set_children_of_role<I>(
        &mut self,
        parent: NodeId,
        role: &'static Role,
        new_children: I,
    ) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let new_children: Vec<NodeId> = new_children
            .into_iter()
            .filter(|child| !child.is_null())
            .collect();
        let parent_data = self.get(parent)?;
        if parent.is_null() {
            return match new_children.first() {
                Some(_) => Err(TreeError::NullReceiver { node: parent }),
                None => Ok(()),
            };
        }
        if parent_data.frozen {
            return Err(TreeError::Frozen { node: parent });
        }

        let current: Vec<NodeId> = self.children_of_role(parent, role).collect();
        if let Some(&frozen) = current.iter().find(|child| self.nodes[child.index()].frozen) {
            return Err(TreeError::Frozen { node: frozen });
        }
        let mut seen = FxHashSet::default();
        for &child in &new_children {
            let data = self.get(child)?;
            if data.frozen {
                return Err(TreeError::Frozen { node: child });
            }
            let reattaching = data.parent == Some(parent) && data.has_role(role);
            if !seen.insert(child) || (data.parent.is_some() && !reattaching) {
                return Err(TreeError::AlreadyAttached { node: child });
            }
            if self.is_ancestor_or_self(child, parent) {
                return Err(TreeError::Cycle { parent, node: child });
            }
        }

        let mut layout: Vec<NodeId> = self
            .children(parent)
            .filter(|&child| !self.nodes[child.index()].has_role(role))
            .collect();
        layout.extend(&new_children);
        for (position, &child) in layout.iter().enumerate() {
            let data = &self.nodes[child.index()];
            let prev = position.checked_sub(1).map(|i| layout[i]);
            let next = layout.get(position + 1).copied();
            if data.frozen && (data.prev_sibling != prev || data.next_sibling != next) {
                return Err(TreeError::Frozen { node: child });
            }
        }

        for &child in &current {
            self.unlink(child);
        }
        for &child in &new_children {
            self.link(parent, None, child, role);
        }
        debug!(
            "set {} {} children of {} (was {})",
            new_children.len(),
            role,
            parent,
            current.len()
        );
        Ok(())
    }

    /// Freezes `node` and its whole subtree. Frozen nodes reject every mutation.
    pub fn freeze(&mut self, node: NodeId) -> Result<(), TreeError> {
        if self.get(node)?.frozen {
            return Ok(());
        }
        let subtree: Vec<NodeId> = std::iter::once(node).chain(self.descendants(node)).collect();
        for id in &subtree {
            self.data_mut(*id).frozen = true;
        }
        debug!("froze {} ({} nodes)", node, subtree.len());
        Ok(())
    }

    pub fn is_frozen(&self, node: NodeId) -> bool {
        self[node].frozen
    }

    /// Copies the subtree rooted at `node` into fresh, detached, unfrozen nodes.
    /// Sentinels clone to themselves.
    pub fn deep_clone(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        if node.is_null() {
            return Ok(node);
        }
        let source = self.get(node)?;
        let (kind, span) = (source.kind.clone(), source.span);
        let copy = self.create(kind);
        self.data_mut(copy).span = span;

        let mut next = self.nodes[node.index()].first_child;
        while let Some(child) = next {
            let role = self.nodes[child.index()].role;
            next = self.nodes[child.index()].next_sibling;
            let child_copy = self.deep_clone(child)?;
            if let Some(role) = role {
                self.link(copy, None, child_copy, role);
            }
        }
        Ok(copy)
    }

    /// Records the source range of a leaf. Sentinels cannot carry one.
    pub fn set_span(&mut self, node: NodeId, span: Span) -> Result<(), TreeError> {
        let data = self.get(node)?;
        if data.frozen {
            return Err(TreeError::Frozen { node });
        }
        self.data_mut(node).span = Some(span);
        Ok(())
    }

    fn check_role(&self, role: &'static Role, candidate: NodeId) -> Result<(), TreeError> {
        let kind = &self.get(candidate)?.kind;
        if role.is_valid(kind) {
            Ok(())
        } else {
            Err(TreeError::RoleMismatch {
                role: role.name(),
                expected: role.category(),
                found: kind.node_type(),
            })
        }
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let child_data = self.get(child)?;
        if parent.is_null() {
            return Err(TreeError::NullReceiver { node: parent });
        }
        let parent_data = self.get(parent)?;
        if parent_data.frozen {
            return Err(TreeError::Frozen { node: parent });
        }
        if child_data.frozen {
            return Err(TreeError::Frozen { node: child });
        }
        if child_data.parent.is_some() {
            return Err(TreeError::AlreadyAttached { node: child });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::Cycle { parent, node: child });
        }
        Ok(())
    }

    /// Rejects a splice that would rewrite the sibling links of a frozen neighbour.
    fn check_neighbours(
        &self,
        prev: Option<NodeId>,
        next: Option<NodeId>,
    ) -> Result<(), TreeError> {
        match [prev, next].into_iter().flatten().find(|n| self.nodes[n.index()].frozen) {
            Some(node) => Err(TreeError::Frozen { node }),
            None => Ok(()),
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        node == candidate || self.ancestors(node).any(|ancestor| ancestor == candidate)
    }

    /// Splices a validated, detached `child` into `parent` before `successor`
    /// (or at the end when `successor` is `None`).
    fn link(
        &mut self,
        parent: NodeId,
        successor: Option<NodeId>,
        child: NodeId,
        role: &'static Role,
    ) {
        let predecessor = match successor {
            Some(successor) => self.nodes[successor.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        {
            let data = self.data_mut(child);
            data.parent = Some(parent);
            data.role = Some(role);
            data.prev_sibling = predecessor;
            data.next_sibling = successor;
        }
        match predecessor {
            Some(prev) => self.data_mut(prev).next_sibling = Some(child),
            None => self.data_mut(parent).first_child = Some(child),
        }
        match successor {
            Some(next) => self.data_mut(next).prev_sibling = Some(child),
            None => self.data_mut(parent).last_child = Some(child),
        }
    }

    /// Cuts an attached `node` out of its parent's child list and clears its links.
    fn unlink(&mut self, node: NodeId) {
        let data = &self.nodes[node.index()];
        let (Some(parent), prev, next) = (data.parent, data.prev_sibling, data.next_sibling) else {
            return;
        };
        match prev {
            Some(prev) => self.data_mut(prev).next_sibling = next,
            None => self.data_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.data_mut(next).prev_sibling = prev,
            None => self.data_mut(parent).last_child = prev,
        }
        let data = self.data_mut(node);
        data.parent = None;
        data.role = None;
        data.prev_sibling = None;
        data.next_sibling = None;
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = NodeData;

    /// # Panics
    /// Panics when `id` was minted by another tree.
    fn index(&self, id: NodeId) -> &NodeData {
        match self.get(id) {
            Ok(data) => data,
            Err(err) => panic!("{}", err),
        }
    }
}
