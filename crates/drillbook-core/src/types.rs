//! Core types for drillbook-core.
//!
//! This module defines the document model read from a page's YAML data file:
//! the top-level [`Document`], its [`Article`]s and technique [`Table`]s, and
//! the [`Entry`] rows those tables are built from.
//!
//! List-valued fields are deserialised leniently. A value of the wrong shape
//! is dropped with a warning instead of failing the whole document, so one
//! bad row never blanks a page.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::dates::format_dates;

/// The parsed contents of a `<page>_data.yaml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub articles: Vec<Article>,
    /// Flat tables, grouped by position only.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tables: Vec<Table>,
    /// Two-level trees, grouped by category then position.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub trees: Vec<Table>,
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

/// A titled list of free-form items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Vec<Item>,
}

/// One bullet of an [`Article`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Text(String),
    /// A single `label: url` mapping.
    Link(Link),
    /// A run of text and links rendered on one line.
    Parts(Vec<Part>),
    /// Anything else. Kept so the document still loads; skipped when rendered.
    Unsupported(serde_yaml::Value),
}

/// A member of an [`Item::Parts`] run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text(String),
    Link(Link),
    Unsupported(serde_yaml::Value),
}

/// A labelled hyperlink, written in YAML as a single-key map `label: url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl TryFrom<BTreeMap<String, String>> for Link {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut pairs = map.into_iter();
        match (pairs.next(), pairs.next()) {
            (Some((label, url)), None) => Ok(Link { label, url }),
            _ => Err("a link must be a map with exactly one `label: url` pair".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Technique tables
// ---------------------------------------------------------------------------

/// A titled set of technique rows. Used for both `tables` and `trees`; the
/// grouping applied is decided by which list the table came from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Table {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub rows: Vec<Entry>,
}

/// A video reference attached to an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub label: String,
    pub url: String,
}

/// A single technique row.
///
/// Every field except `technique` may be absent in the data file. Missing
/// grouping keys become the empty string so the row still lands in a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub technique: String,
    #[serde(default, deserialize_with = "lenient_key")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_key")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub rationale: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub offense: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub defense: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub transitions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub drills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub videos: Vec<Video>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub dates: Vec<String>,
}

impl Entry {
    pub fn new(technique: impl Into<String>) -> Self {
        Self {
            technique: technique.into(),
            ..Default::default()
        }
    }

    /// Every field of the entry joined into one case-folded blob.
    ///
    /// Fields are separated by newlines. Query terms never contain
    /// whitespace, so a term can never match across two fields.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            self.technique.as_str(),
            self.category.as_str(),
            self.position.as_str(),
        ];
        for list in self.text_lists() {
            parts.extend(list.iter().map(String::as_str));
        }
        for video in &self.videos {
            parts.push(&video.label);
            parts.push(&video.url);
        }
        parts.extend(self.dates.iter().map(String::as_str));
        parts.join("\n").to_lowercase()
    }

    /// Headed detail sections in display order, empty ones omitted.
    pub fn detail_sections(&self) -> Vec<(&'static str, Vec<String>)> {
        let mut sections: Vec<(&'static str, Vec<String>)> = SECTION_HEADINGS
            .iter()
            .zip(self.text_lists())
            .filter(|(_, list)| !list.is_empty())
            .map(|(heading, list)| (*heading, list.clone()))
            .collect();

        if !self.videos.is_empty() {
            let lines = self
                .videos
                .iter()
                .map(|v| format!("{} ({})", v.label, v.url))
                .collect();
            sections.push(("Videos", lines));
        }
        if !self.dates.is_empty() {
            sections.push(("Dates", vec![format_dates(&self.dates)]));
        }
        sections
    }

    fn text_lists(&self) -> [&Vec<String>; 6] {
        [
            &self.steps,
            &self.rationale,
            &self.offense,
            &self.defense,
            &self.transitions,
            &self.drills,
        ]
    }
}

const SECTION_HEADINGS: [&str; 6] = [
    "Steps",
    "Rationale",
    "Offense",
    "Defense",
    "Transitions",
    "Drills",
];

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

/// Read a field as a raw YAML sequence. A null field is an empty list; any
/// other non-sequence value is dropped with a warning.
fn raw_sequence<'de, D>(deserializer: D) -> Result<Vec<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_yaml::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Sequence(values) => values,
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(value = ?other, "expected a list, ignoring field");
            Vec::new()
        }
    })
}

/// Deserialise a sequence, keeping only the elements that parse as `T`.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(raw_sequence(deserializer)?
        .into_iter()
        .filter_map(|value| match serde_yaml::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed list element");
                None
            }
        })
        .collect())
}

/// Textual form of a YAML scalar. Null and nested values come back as `Err`.
fn scalar_text(value: serde_yaml::Value) -> Result<String, serde_yaml::Value> {
    use serde_yaml::Value;

    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(other),
    }
}

/// Deserialise a list of strings. Scalars (numbers, booleans) are converted
/// to their textual form; nested structures are dropped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_sequence(deserializer)?
        .into_iter()
        .filter_map(|value| match scalar_text(value) {
            Ok(text) => Some(text),
            Err(other) => {
                tracing::warn!(value = ?other, "skipping non-scalar text item");
                None
            }
        })
        .collect())
}

/// Deserialise a grouping key. `position: 1` groups under `"1"`; a null or
/// nested value becomes the empty key instead of rejecting the row.
fn lenient_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match scalar_text(serde_yaml::Value::deserialize(deserializer)?) {
        Ok(key) => Ok(key),
        Err(serde_yaml::Value::Null) => Ok(String::new()),
        Err(other) => {
            tracing::warn!(value = ?other, "non-scalar grouping key, using the empty key");
            Ok(String::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
