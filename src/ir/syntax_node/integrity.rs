use tracing::warn;

use super::node_types::NodeId;
use super::tree::SyntaxTree;
use crate::ir::error::IntegrityError;

impl SyntaxTree {
    /// Checks the linkage invariants of every node in the arena: mirrored sibling
    /// links, child lists that start and end at the recorded boundaries, roles on
    /// exactly the attached nodes, and no node being its own ancestor.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        self.verify_links().inspect_err(|err| warn!("syntax tree integrity check failed: {}", err))
    }

    fn verify_links(&self) -> Result<(), IntegrityError> {
        let limit = self.len();
        let mut listed = 0usize;
        let mut attached = 0usize;

        for node in self.node_ids() {
            let data = &self[node];
            match data.parent() {
                Some(_) => {
                    attached += 1;
                    if data.role().is_none() {
                        return Err(IntegrityError::MissingRole { node });
                    }
                }
                None => {
                    if data.role().is_some()
                        || data.prev_sibling().is_some()
                        || data.next_sibling().is_some()
                    {
                        return Err(IntegrityError::StaleLinks { node });
                    }
                }
            }
            if self.ancestors(node).take(limit + 1).count() > limit {
                return Err(IntegrityError::Cycle { node });
            }
            listed += self.verify_child_list(node, limit)?;
        }

        if listed != attached {
            let orphan = self
                .node_ids()
                .find(|&node| {
                    self.parent(node)
                        .is_some_and(|parent| !self.is_listed(parent, node, limit))
                });
            return Err(IntegrityError::Unreachable {
                node: orphan.unwrap_or(NodeId::null_statement()),
            });
        }
        Ok(())
    }

    fn is_listed(&self, parent: NodeId, node: NodeId, limit: usize) -> bool {
        self.children(parent).take(limit).any(|child| child == node)
    }

    /// Walks one child list, returning its length.
    fn verify_child_list(&self, parent: NodeId, limit: usize) -> Result<usize, IntegrityError> {
        let data = &self[parent];
        let mut previous: Option<NodeId> = None;
        let mut next = data.first_child();
        let mut count = 0;

        while let Some(child) = next {
            count += 1;
            if count > limit {
                return Err(IntegrityError::Cycle { node: child });
            }
            let child_data = &self[child];
            if child_data.parent() != Some(parent) {
                return Err(IntegrityError::WrongParent { node: child, parent });
            }
            if child_data.prev_sibling() != previous {
                return Err(IntegrityError::AsymmetricSibling {
                    node: child,
                    sibling: previous.or(child_data.prev_sibling()).unwrap_or(parent),
                });
            }
            previous = Some(child);
            next = child_data.next_sibling();
        }

        if previous != data.last_child() {
            return Err(IntegrityError::BoundaryMismatch { parent });
        }
        Ok(count)
    }
}
