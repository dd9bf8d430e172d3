//! Hierarchy builder — groups flat technique rows into a nested outline.
//!
//! The builder is depth-parametric: it takes an ordered list of
//! [`GroupKey`] selectors and produces one level of [`GroupNode`]s per
//! selector, with [`Leaf`] nodes below the last level. A flat table uses
//! `[Position]`; a tree uses `[Category, Position]`.
//!
//! Grouping is stable: keys appear in the order they are first seen in the
//! input, never sorted, because that order is the display order.

use std::collections::HashMap;

use crate::types::Entry;

/// Which entry field a hierarchy level groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Category,
    Position,
}

impl GroupKey {
    pub fn key_of<'a>(&self, entry: &'a Entry) -> &'a str {
        match self {
            GroupKey::Category => &entry.category,
            GroupKey::Position => &entry.position,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Category => write!(f, "category"),
            GroupKey::Position => write!(f, "position"),
        }
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// An internal outline node.
///
/// `key` and `children` are fixed at construction. Only `count`, `visible`
/// and `expanded` change afterwards, driven by the collapse controller and
/// the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub key: String,
    pub children: Children,
    /// Descendant leaves at construction time.
    pub total: usize,
    /// Descendant leaves matching the active query (`total` when none).
    pub count: usize,
    pub visible: bool,
    pub expanded: bool,
}

/// A node holds either sub-groups or leaves, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    Groups(Vec<GroupNode>),
    Leaves(Vec<Leaf>),
}

/// A technique row in the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub entry: Entry,
    /// Cached [`Entry::search_text`].
    pub search_text: String,
    pub visible: bool,
    /// Whether the detail panel is open.
    pub expanded: bool,
}

impl Leaf {
    pub fn new(entry: Entry) -> Self {
        let search_text = entry.search_text();
        Self {
            entry,
            search_text,
            visible: true,
            expanded: false,
        }
    }
}

impl GroupNode {
    fn new(key: impl Into<String>, children: Children) -> Self {
        let total = match &children {
            Children::Groups(groups) => groups.iter().map(|g| g.total).sum(),
            Children::Leaves(leaves) => leaves.len(),
        };
        Self {
            key: key.into(),
            children,
            total,
            count: total,
            visible: true,
            expanded: false,
        }
    }

    /// Iterate over every leaf below this node, in display order.
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &Leaf> + '_> {
        match &self.children {
            Children::Leaves(leaves) => Box::new(leaves.iter()),
            Children::Groups(groups) => Box::new(groups.iter().flat_map(|g| g.leaves())),
        }
    }

    /// Find a direct child group by key.
    pub fn group(&self, key: &str) -> Option<&GroupNode> {
        match &self.children {
            Children::Groups(groups) => groups.iter().find(|g| g.key == key),
            Children::Leaves(_) => None,
        }
    }

    /// Number of direct children of either kind.
    pub fn child_len(&self) -> usize {
        match &self.children {
            Children::Groups(groups) => groups.len(),
            Children::Leaves(leaves) => leaves.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build an outline root named `title` from `entries`, grouping by each of
/// `selectors` in turn.
///
/// The root is always a [`GroupNode`], even when `entries` is empty; in that
/// case it simply has no children and a total of zero.
pub fn build(title: &str, entries: Vec<Entry>, selectors: &[GroupKey]) -> GroupNode {
    let root = GroupNode::new(title, build_level(entries, selectors));
    tracing::debug!(
        title,
        depth = selectors.len(),
        leaves = root.total,
        "hierarchy built"
    );
    root
}

fn build_level(entries: Vec<Entry>, selectors: &[GroupKey]) -> Children {
    let Some((selector, rest)) = selectors.split_first() else {
        return Children::Leaves(entries.into_iter().map(Leaf::new).collect());
    };

    let groups = group_by(entries, *selector)
        .into_iter()
        .map(|(key, members)| GroupNode::new(key, build_level(members, rest)))
        .collect();
    Children::Groups(groups)
}

/// Stable group-by preserving first-seen key order.
fn group_by(entries: Vec<Entry>, selector: GroupKey) -> Vec<(String, Vec<Entry>)> {
    let mut order: Vec<(String, Vec<Entry>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = selector.key_of(&entry).to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push((key, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(entry);
    }

    order
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
