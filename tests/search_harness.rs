//! Search engine integration harness.
//!
//! # What this covers
//!
//! - **Matcher cases**: AND, NOT and OR semantics through the public
//!   [`matches_search`] entry point, table-driven with `rstest`.
//! - **Count propagation**: every group's count is its number of matching
//!   descendant leaves, and groups with nothing left are hidden.
//! - **Reset invariant**: after any sequence of queries ending in the empty
//!   query, the tree below the root equals a freshly built one.
//! - **Interaction with manual toggles**: toggling during a search works on
//!   the filtered tree; clearing forgets every toggle.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use drillbook_core::{matches_search, Children, GroupNode, Outline};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Every node below `node` is visible, collapsed and fully counted.
fn assert_baseline_below(node: &GroupNode) {
    assert_eq!(node.count, node.total, "count of {}", node.key);
    match &node.children {
        Children::Groups(groups) => {
            for group in groups {
                assert!(group.visible, "{} hidden", group.key);
                assert!(!group.expanded, "{} still open", group.key);
                assert_baseline_below(group);
            }
        }
        Children::Leaves(leaves) => {
            for leaf in leaves {
                assert!(leaf.visible, "{} hidden", leaf.entry.technique);
                assert!(!leaf.expanded, "{} still open", leaf.entry.technique);
            }
        }
    }
}

fn group<'a>(outline: &'a Outline, path: &[&str]) -> &'a GroupNode {
    path.iter().fold(outline.root(), |node, key| {
        node.group(key)
            .unwrap_or_else(|| panic!("no group {key} under {}", node.key))
    })
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

#[rstest]
#[case::and_all_present("wrist lock defense", "wrist lock", true)]
#[case::and_one_missing("wrist lock", "wrist choke", false)]
#[case::not_present("armbar from guard", "armbar not guard", false)]
#[case::not_absent("armbar from mount", "armbar not guard", true)]
#[case::or_first("triangle choke", "triangle or armbar", true)]
#[case::or_neither("kimura", "triangle or armbar", false)]
#[case::or_with_required("armbar from mount", "mount triangle or armbar", true)]
#[case::case_folded("ARMBAR From Mount", "armbar MOUNT", true)]
#[case::substring("armbar", "arm", true)]
#[case::empty_query_empty_text("", "", true)]
#[case::blank_query("anything", "   ", true)]
#[case::connectors_only("anything", "or not", true)]
fn matcher_cases(#[case] text: &str, #[case] query: &str, #[case] expected: bool) {
    assert_eq!(matches_search(text, query), expected);
}

// ---------------------------------------------------------------------------
// Count propagation
// ---------------------------------------------------------------------------

fn abc() -> Outline {
    tree(
        "Techniques",
        &[("t1", "A", "pos1"), ("t2", "A", "pos1"), ("t3", "B", "pos2")],
    )
}

#[test]
fn counts_follow_matching_leaves() {
    let mut outline = abc();
    outline.on_query_changed("t1 or t3");

    assert_eq!(outline.root().count, 2);
    assert_eq!(group(&outline, &["A"]).count, 1);
    assert_eq!(group(&outline, &["A", "pos1"]).count, 1);
    assert_eq!(group(&outline, &["B"]).count, 1);
    assert_eq!(group(&outline, &["B", "pos2"]).count, 1);
    assert_eq!(
        shown(&outline),
        vec!["Techniques", "  A", "    pos1", "      t1", "  B", "    pos2", "      t3"]
    );
}

#[test]
fn no_match_hides_every_group_but_keeps_the_root() {
    let mut outline = abc();
    outline.on_query_changed("zzz");

    for path in [&["A"][..], &["A", "pos1"], &["B"], &["B", "pos2"]] {
        let node = group(&outline, path);
        assert_eq!(node.count, 0, "{path:?}");
        assert!(!node.visible, "{path:?}");
    }
    assert_eq!(outline.root().count, 0);
    assert_eq!(shown(&outline), vec!["Techniques"]);
}

#[test]
fn exclusion_hides_whole_branches() {
    let mut outline = tree("Guard", THREE_BY_TWO_BY_TWO);
    outline.on_query_changed("not closed not open");
    assert_eq!(outline.root().count, 4);
    assert!(!group(&outline, &["Submissions"]).visible);
    assert!(!group(&outline, &["Sweeps"]).visible);
    assert_eq!(group(&outline, &["Escapes"]).count, 4);
}

// ---------------------------------------------------------------------------
// Reset invariant
// ---------------------------------------------------------------------------

#[test]
fn clearing_restores_the_built_state() {
    let fresh = tree("Guard", THREE_BY_TWO_BY_TWO);
    let mut outline = fresh.clone();

    outline.on_query_changed("kimura");
    assert_eq!(outline.root().count, 1);
    assert!(outline.root().expanded);
    outline.on_query_changed("");

    assert_baseline_below(outline.root());
    assert!(!outline.root().expanded);
    assert_eq!(outline, fresh);
}

#[test]
fn clearing_forgets_manual_toggles() {
    let fresh = tree("Guard", THREE_BY_TWO_BY_TWO);
    let mut outline = fresh.clone();

    outline.set_expanded(&[], true);
    outline.set_expanded(&[2], true);
    outline.set_expanded(&[2, 1], true);
    outline.on_query_changed("frame or ghost");
    outline.toggle(&[0, 1, 0]);
    outline.on_query_changed("fram");
    outline.on_query_changed("");

    let mut opened = fresh;
    opened.set_expanded(&[], true);
    assert_eq!(outline, opened);
}

#[test]
fn typing_character_by_character_matches_a_single_parse() {
    let mut typed = tree("Guard", THREE_BY_TWO_BY_TWO);
    let query = "sweeps not flower";
    for end in 1..=query.len() {
        typed.on_query_changed(&query[..end]);
    }
    let mut direct = tree("Guard", THREE_BY_TWO_BY_TWO);
    direct.on_query_changed(query);
    assert_eq!(typed.root(), direct.root());
    assert_eq!(typed.root().count, 3);
}

// ---------------------------------------------------------------------------
// Manual toggles during a search
// ---------------------------------------------------------------------------

#[test]
fn collapsing_a_matched_group_hides_its_matches_until_reopened() {
    let mut outline = tree("Guard", THREE_BY_TWO_BY_TWO);
    outline.on_query_changed("kimura or scissor");
    assert_eq!(
        shown(&outline),
        vec![
            "Guard",
            "  Submissions",
            "    closed",
            "      kimura",
            "  Sweeps",
            "    closed",
            "      scissor",
        ]
    );

    outline.toggle(&[0]);
    assert_eq!(
        shown(&outline),
        vec!["Guard", "  Submissions", "  Sweeps", "    closed", "      scissor"]
    );

    outline.toggle(&[0]);
    assert_eq!(
        shown(&outline),
        vec![
            "Guard",
            "  Submissions",
            "    closed",
            "  Sweeps",
            "    closed",
            "      scissor",
        ]
    );
}

#[test]
fn hits_report_group_keys() {
    let mut outline = tree("Guard", THREE_BY_TWO_BY_TWO);
    outline.on_query_changed("trap");
    let hits = outline.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].groups, vec!["Escapes", "mount"]);
    assert_eq!(hits[0].entry.technique, "trap and roll");
}
