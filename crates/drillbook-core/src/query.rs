//! Search query parsing and matching.
//!
//! A query is a whitespace-separated list of terms with two connectors:
//!
//! - `or` joins its neighbours into one disjunction: `triangle or armbar`
//! - `not` excludes the next term: `armbar not guard`
//!
//! Every other term must be present. All terms are matched as
//! case-insensitive substrings of an entry's search text, so `arm` matches
//! `armbar`. Parsing never fails: stray connectors are ignored and an empty
//! query matches everything.

use std::collections::BTreeSet;

const OR: &str = "or";
const NOT: &str = "not";

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms that must all appear.
    pub must_include: BTreeSet<String>,
    /// Terms that must not appear.
    pub must_exclude: BTreeSet<String>,
    /// Each group needs at least one of its terms to appear.
    pub or_groups: Vec<BTreeSet<String>>,
}

impl Query {
    /// Parse a raw query string.
    ///
    /// Tokens are classified by position with a single token of lookback
    /// and lookahead:
    ///
    /// 1. `or` and `not` are connectors and never become terms.
    /// 2. A token right after `or` joins the open OR group (or opens one).
    /// 3. A token right before `or` opens a new OR group.
    /// 4. A token right after `not` is excluded.
    /// 5. Anything else is required.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        let mut query = Query::default();
        // Whether the last OR group can still be extended by `or <term>`.
        let mut chain_open = false;

        for (i, &token) in tokens.iter().enumerate() {
            if token == OR || token == NOT {
                continue;
            }
            let prev = i.checked_sub(1).map(|j| tokens[j]);
            let next = tokens.get(i + 1).copied();

            if prev == Some(OR) {
                if !chain_open {
                    query.or_groups.push(BTreeSet::new());
                    chain_open = true;
                }
                if let Some(group) = query.or_groups.last_mut() {
                    group.insert(token.to_string());
                }
            } else if next == Some(OR) {
                query.or_groups.push(BTreeSet::from([token.to_string()]));
                chain_open = true;
            } else if prev == Some(NOT) {
                query.must_exclude.insert(token.to_string());
                chain_open = false;
            } else {
                query.must_include.insert(token.to_string());
                chain_open = false;
            }
        }

        query
    }

    /// True when the query has no terms and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.must_include.is_empty() && self.must_exclude.is_empty() && self.or_groups.is_empty()
    }

    /// Evaluate the query against already case-folded text.
    pub fn matches(&self, text: &str) -> bool {
        self.must_include.iter().all(|t| text.contains(t.as_str()))
            && !self.must_exclude.iter().any(|t| text.contains(t.as_str()))
            && self
                .or_groups
                .iter()
                .all(|group| group.iter().any(|t| text.contains(t.as_str())))
    }
}

/// Parse `query` and evaluate it against `text`. `text` is folded here, so
/// callers may pass it in any case.
pub fn matches_search(text: &str, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    Query::parse(query).matches(&text.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
