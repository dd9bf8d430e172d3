//! Collapse/expand state controller.
//!
//! Nodes are addressed by a [`NodePath`]: the child indices walked from the
//! outline root, so `[]` is the root itself and `[1, 0]` is the first child
//! of the root's second child.
//!
//! Opening a node only reveals its direct children. Closing a group cascades:
//! every descendant is collapsed and every detail panel below it is hidden,
//! so reopening always starts from a fully collapsed subtree.

use crate::hierarchy::{Children, GroupNode, Leaf};

/// Child indices from the root to a node.
pub type NodePath = Vec<usize>;

/// Indicator for a closed node.
pub const CHEVRON_CLOSED: &str = "▸ ";
/// Indicator for an open node.
pub const CHEVRON_OPEN: &str = "▾ ";

/// The indicator glyph for a node's expanded state.
pub fn chevron(expanded: bool) -> &'static str {
    if expanded {
        CHEVRON_OPEN
    } else {
        CHEVRON_CLOSED
    }
}

/// A shared reference to either kind of outline node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Group(&'a GroupNode),
    Leaf(&'a Leaf),
}

impl NodeRef<'_> {
    pub fn expanded(&self) -> bool {
        match self {
            NodeRef::Group(g) => g.expanded,
            NodeRef::Leaf(l) => l.expanded,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            NodeRef::Group(g) => g.visible,
            NodeRef::Leaf(l) => l.visible,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeRef::Group(g) => &g.key,
            NodeRef::Leaf(l) => &l.entry.technique,
        }
    }

    pub fn chevron(&self) -> &'static str {
        chevron(self.expanded())
    }
}

/// A mutable reference to either kind of outline node.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Group(&'a mut GroupNode),
    Leaf(&'a mut Leaf),
}

impl GroupNode {
    /// Look up the node at `path` below (or at) this node.
    pub fn node(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(NodeRef::Group(self));
        };
        match &self.children {
            Children::Groups(groups) => groups.get(first)?.node(rest),
            Children::Leaves(leaves) if rest.is_empty() => leaves.get(first).map(NodeRef::Leaf),
            Children::Leaves(_) => None,
        }
    }

    /// Mutable counterpart of [`GroupNode::node`].
    pub fn node_mut(&mut self, path: &[usize]) -> Option<NodeMut<'_>> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(NodeMut::Group(self));
        };
        match &mut self.children {
            Children::Groups(groups) => groups.get_mut(first)?.node_mut(rest),
            Children::Leaves(leaves) if rest.is_empty() => {
                leaves.get_mut(first).map(NodeMut::Leaf)
            }
            Children::Leaves(_) => None,
        }
    }

    /// Open or close the node at `path`. Closing a group cascades to all of
    /// its descendants. Returns `false` if no node lives at `path`.
    pub fn set_expanded(&mut self, path: &[usize], expanded: bool) -> bool {
        match self.node_mut(path) {
            Some(NodeMut::Group(group)) if expanded => {
                group.expanded = true;
                true
            }
            Some(NodeMut::Group(group)) => {
                group.collapse();
                true
            }
            Some(NodeMut::Leaf(leaf)) => {
                leaf.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Flip the node at `path`, returning its new expanded state.
    pub fn toggle(&mut self, path: &[usize]) -> Option<bool> {
        let expanded = !self.node(path)?.expanded();
        self.set_expanded(path, expanded);
        tracing::debug!(?path, expanded, "outline: toggle");
        Some(expanded)
    }

    /// Close this node and everything below it.
    pub fn collapse(&mut self) {
        self.expanded = false;
        match &mut self.children {
            Children::Groups(groups) => groups.iter_mut().for_each(GroupNode::collapse),
            Children::Leaves(leaves) => leaves.iter_mut().for_each(|l| l.expanded = false),
        }
    }

    /// Restore the construction-time state of this node's descendants:
    /// everything visible, collapsed, and counted in full. The node's own
    /// `expanded` flag is left alone.
    pub fn reset_descendants(&mut self) {
        self.count = self.total;
        self.visible = true;
        match &mut self.children {
            Children::Groups(groups) => {
                for group in groups.iter_mut() {
                    group.reset_descendants();
                    group.expanded = false;
                }
            }
            Children::Leaves(leaves) => {
                for leaf in leaves.iter_mut() {
                    leaf.visible = true;
                    leaf.expanded = false;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
