//! Test builders — ergonomic constructors for `Entry` rows and outlines.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use drillbook_core::{Entry, GroupKey, Outline, Video};

// ---------------------------------------------------------------------------
// EntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Entry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = EntryBuilder::new("kimura")
///     .category("Submissions")
///     .position("closed guard")
///     .steps(["break posture", "figure four"])
///     .build();
/// ```
pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    pub fn new(technique: impl Into<String>) -> Self {
        Self {
            entry: Entry::new(technique),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.entry.category = category.into();
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.entry.position = position.into();
        self
    }

    pub fn steps<const N: usize>(mut self, steps: [&str; N]) -> Self {
        self.entry.steps = steps.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn drills<const N: usize>(mut self, drills: [&str; N]) -> Self {
        self.entry.drills = drills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn video(mut self, label: &str, url: &str) -> Self {
        self.entry.videos.push(Video {
            label: label.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn dates<const N: usize>(mut self, dates: [&str; N]) -> Self {
        self.entry.dates = dates.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Entry {
        self.entry
    }
}

// ---------------------------------------------------------------------------
// Outline helpers
// ---------------------------------------------------------------------------

/// `(technique, category, position)` triples as entries.
pub fn entries(rows: &[(&str, &str, &str)]) -> Vec<Entry> {
    rows.iter()
        .map(|(t, c, p)| EntryBuilder::new(*t).category(*c).position(*p).build())
        .collect()
}

/// A category → position outline over `rows`.
pub fn tree(title: &str, rows: &[(&str, &str, &str)]) -> Outline {
    Outline::new(title, entries(rows), &[GroupKey::Category, GroupKey::Position])
}

/// Row labels of the outline as displayed, indented two spaces per level.
pub fn shown(outline: &Outline) -> Vec<String> {
    outline
        .rows()
        .iter()
        .map(|r| format!("{}{}", "  ".repeat(r.depth), r.node.label()))
        .collect()
}
