//! Random edit scripts for property-based testing of syntax trees.
//!
//! An [`EditScript`] is a sequence of [`EditOp`]s that a test replays against a
//! tree. Node operands are plain indices; the test maps them onto whatever nodes
//! it has allocated so far (modulo the pool size), so every script is replayable
//! regardless of how many earlier steps failed.
//!
//! Scripts deliberately mix legal and illegal edits: attaching a node that is
//! already attached, inserting relative to a node that is not a child, or
//! attaching an ancestor below its descendant are all generated, which lets the
//! test check that rejected edits leave the tree untouched.

use quickcheck::{Arbitrary, Gen};

/// Upper bound on the number of edits in one script.
const MAX_OPS: usize = 40;

/// Upper bound on the number of fresh nodes a bulk set introduces.
const MAX_BULK: usize = 4;

/// Abstract child slot; tests map it onto a concrete role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Statement,
    Initializer,
    Iterator,
    Embedded,
    Condition,
}

/// Category of a node the script asks to allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fresh {
    Statement,
    Expression,
}

/// A single tree mutation. Indices select from the test's node pool.
#[derive(Clone, Debug)]
pub enum EditOp {
    /// Allocate a node and append it under `parent`.
    Add { parent: usize, slot: Slot, fresh: Fresh },
    /// Append an already allocated node, which may be attached or an ancestor.
    Attach { parent: usize, child: usize, slot: Slot },
    /// Allocate a node and insert it before `anchor` among `parent`'s children.
    InsertBefore { parent: usize, anchor: usize, slot: Slot, fresh: Fresh },
    /// Allocate a node and insert it after `anchor` among `parent`'s children.
    InsertAfter { parent: usize, anchor: usize, slot: Slot, fresh: Fresh },
    Remove { node: usize },
    /// Replace `node` with a freshly allocated node.
    Replace { node: usize, fresh: Fresh },
    /// Replace `node` with an already allocated node.
    ReplaceWith { node: usize, with: usize },
    /// Set the single child of `slot`; `None` clears it.
    SetChild { parent: usize, slot: Slot, fresh: Option<Fresh> },
    /// Replace every child of `slot` with `existing` pool nodes followed by `fresh` ones.
    SetChildren { parent: usize, slot: Slot, existing: Vec<usize>, fresh: Vec<Fresh> },
}

/// A replayable sequence of edits.
#[derive(Clone, Debug)]
pub struct EditScript {
    pub ops: Vec<EditOp>,
}

impl Arbitrary for Slot {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[
            Slot::Statement,
            Slot::Initializer,
            Slot::Iterator,
            Slot::Embedded,
            Slot::Condition,
        ])
        .unwrap()
    }
}

impl Arbitrary for Fresh {
    fn arbitrary(g: &mut Gen) -> Self {
        // Statements dominate so that subtrees grow deep enough to be interesting.
        *g.choose(&[Fresh::Statement, Fresh::Statement, Fresh::Expression]).unwrap()
    }
}

fn gen_index(g: &mut Gen) -> usize {
    usize::arbitrary(g)
}

fn gen_op(g: &mut Gen) -> EditOp {
    match u8::arbitrary(g) % 12 {
        0..=2 => EditOp::Add {
            parent: gen_index(g),
            slot: Slot::arbitrary(g),
            fresh: Fresh::arbitrary(g),
        },
        3 => EditOp::Attach {
            parent: gen_index(g),
            child: gen_index(g),
            slot: Slot::arbitrary(g),
        },
        4 => EditOp::InsertBefore {
            parent: gen_index(g),
            anchor: gen_index(g),
            slot: Slot::arbitrary(g),
            fresh: Fresh::arbitrary(g),
        },
        5 => EditOp::InsertAfter {
            parent: gen_index(g),
            anchor: gen_index(g),
            slot: Slot::arbitrary(g),
            fresh: Fresh::arbitrary(g),
        },
        6 => EditOp::Remove { node: gen_index(g) },
        7 => EditOp::Replace { node: gen_index(g), fresh: Fresh::arbitrary(g) },
        8 => EditOp::ReplaceWith { node: gen_index(g), with: gen_index(g) },
        9 => EditOp::SetChild {
            parent: gen_index(g),
            slot: Slot::arbitrary(g),
            fresh: Option::<Fresh>::arbitrary(g),
        },
        _ => {
            let existing_len = usize::arbitrary(g) % (MAX_BULK + 1);
            let fresh_len = usize::arbitrary(g) % (MAX_BULK + 1);
            EditOp::SetChildren {
                parent: gen_index(g),
                slot: Slot::arbitrary(g),
                existing: (0..existing_len).map(|_| gen_index(g)).collect(),
                fresh: (0..fresh_len).map(|_| Fresh::arbitrary(g)).collect(),
            }
        }
    }
}

impl Arbitrary for EditOp {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_op(g)
    }
}

impl Arbitrary for EditScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size().min(MAX_OPS) + 1);
        EditScript { ops: (0..len).map(|_| gen_op(g)).collect() }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let ops = self.ops.clone();
        Box::new((0..ops.len()).rev().map(move |skip| {
            let mut shorter = ops.clone();
            shorter.remove(skip);
            EditScript { ops: shorter }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_respect_max_ops() {
        let mut g = Gen::new(1000);
        for _ in 0..50 {
            assert!(EditScript::arbitrary(&mut g).ops.len() <= MAX_OPS);
        }
    }

    #[test]
    fn test_shrink_drops_one_op_at_a_time() {
        let script = EditScript {
            ops: vec![EditOp::Remove { node: 0 }, EditOp::Remove { node: 1 }],
        };
        let shrunk: Vec<usize> = script.shrink().map(|s| s.ops.len()).collect();
        assert_eq!(shrunk, vec![1, 1]);
    }
}
