//! Search propagation engine.
//!
//! An [`Outline`] owns one built hierarchy plus the query currently applied
//! to it. Each call to [`Outline::on_query_changed`] recomputes the whole
//! tree synchronously:
//!
//! - **Non-empty query**: every leaf is matched, every group's `count`
//!   becomes its number of matching leaves, groups with no matches are
//!   hidden, and everything on the path to a match is force-expanded.
//! - **Empty query**: every override is dropped and the tree returns to
//!   exactly the state it had after construction. Manual expand/collapse
//!   history below the root is forgotten.
//!
//! The root is the outline's title row and always stays visible. A search
//! opens it when anything matches; clearing the search puts it back the way
//! it was before the search started.

use crate::collapse::{NodePath, NodeRef};
use crate::hierarchy::{self, Children, GroupKey, GroupNode, Leaf};
use crate::query::Query;
use crate::types::Entry;

/// A searchable, collapsible outline of technique rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    root: GroupNode,
    query: Query,
    /// The root's `expanded` flag when the current search began.
    root_open_before_search: Option<bool>,
}

/// One displayed row of an outline.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub depth: usize,
    pub path: NodePath,
    pub node: NodeRef<'a>,
}

/// A leaf matching the active query, with the group keys above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<'a> {
    pub groups: Vec<&'a str>,
    pub entry: &'a Entry,
}

impl Outline {
    pub fn new(title: &str, entries: Vec<Entry>, selectors: &[GroupKey]) -> Self {
        Self {
            root: hierarchy::build(title, entries, selectors),
            query: Query::default(),
            root_open_before_search: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.root.key
    }

    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// The query currently applied. Empty when no search is active.
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Re-parse `raw` and recompute visibility, counts and expansion.
    pub fn on_query_changed(&mut self, raw: &str) {
        self.apply(Query::parse(raw));
    }

    /// Apply an already-parsed query.
    pub fn apply(&mut self, query: Query) {
        if query.is_empty() {
            self.root.reset_descendants();
            if let Some(open) = self.root_open_before_search.take() {
                self.root.expanded = open;
            }
            tracing::debug!(title = %self.root.key, "search: cleared, baseline restored");
        } else {
            let root_open = self.root.expanded;
            self.root_open_before_search.get_or_insert(root_open);
            let count = propagate(&mut self.root, &query);
            self.root.visible = true;
            self.root.expanded = root_open || count > 0;
            tracing::debug!(
                title = %self.root.key,
                ?query,
                matches = count,
                "search: query applied"
            );
        }
        self.query = query;
    }

    /// Toggle the node at `path` (see [`GroupNode::toggle`]).
    pub fn toggle(&mut self, path: &[usize]) -> Option<bool> {
        self.root.toggle(path)
    }

    pub fn set_expanded(&mut self, path: &[usize], expanded: bool) -> bool {
        self.root.set_expanded(path, expanded)
    }

    /// Close every node, the root included.
    pub fn collapse_all(&mut self) {
        self.root.collapse();
    }

    pub fn node(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        self.root.node(path)
    }

    /// Rows currently on screen: the root, then every visible node whose
    /// ancestors are all expanded, in display order.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = vec![Row {
            depth: 0,
            path: Vec::new(),
            node: NodeRef::Group(&self.root),
        }];
        if self.root.expanded {
            push_children(&self.root, &mut Vec::new(), 1, &mut rows);
        }
        rows
    }

    /// Every visible leaf with the group keys leading to it. With no active
    /// query this is every leaf.
    pub fn hits(&self) -> Vec<Hit<'_>> {
        let mut hits = Vec::new();
        collect_hits(&self.root, &mut Vec::new(), &mut hits);
        hits
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// Match every leaf below `node` and return how many matched. Groups get
/// their count, visibility and expansion from the result.
fn propagate(node: &mut GroupNode, query: &Query) -> usize {
    let count = match &mut node.children {
        Children::Groups(groups) => groups.iter_mut().map(|g| propagate(g, query)).sum(),
        Children::Leaves(leaves) => leaves
            .iter_mut()
            .map(|leaf| mark_leaf(leaf, query))
            .filter(|&matched| matched)
            .count(),
    };
    node.count = count;
    node.visible = count > 0;
    node.expanded = count > 0;
    count
}

fn mark_leaf(leaf: &mut Leaf, query: &Query) -> bool {
    let matched = query.matches(&leaf.search_text);
    leaf.visible = matched;
    leaf.expanded = matched;
    matched
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

fn push_children<'a>(
    node: &'a GroupNode,
    path: &mut NodePath,
    depth: usize,
    rows: &mut Vec<Row<'a>>,
) {
    match &node.children {
        Children::Groups(groups) => {
            for (i, group) in groups.iter().enumerate() {
                if !group.visible {
                    continue;
                }
                path.push(i);
                rows.push(Row {
                    depth,
                    path: path.clone(),
                    node: NodeRef::Group(group),
                });
                if group.expanded {
                    push_children(group, path, depth + 1, rows);
                }
                path.pop();
            }
        }
        Children::Leaves(leaves) => {
            for (i, leaf) in leaves.iter().enumerate().filter(|(_, l)| l.visible) {
                path.push(i);
                rows.push(Row {
                    depth,
                    path: path.clone(),
                    node: NodeRef::Leaf(leaf),
                });
                path.pop();
            }
        }
    }
}

fn collect_hits<'a>(node: &'a GroupNode, keys: &mut Vec<&'a str>, hits: &mut Vec<Hit<'a>>) {
    match &node.children {
        Children::Groups(groups) => {
            for group in groups.iter().filter(|g| g.visible) {
                keys.push(&group.key);
                collect_hits(group, keys, hits);
                keys.pop();
            }
        }
        Children::Leaves(leaves) => {
            hits.extend(leaves.iter().filter(|l| l.visible).map(|l| Hit {
                groups: keys.clone(),
                entry: &l.entry,
            }));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
