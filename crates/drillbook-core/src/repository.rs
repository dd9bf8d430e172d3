//! Title-indexed store of everything a page can display.
//!
//! A [`Repository`] is built once from a loaded [`Document`] and passed by
//! reference to whoever needs lookups. Titles are unique: when two records
//! share a title the later one replaces the earlier, keeping the earlier
//! one's position in [`Repository::titles`].

use std::collections::HashMap;

use crate::hierarchy::GroupKey;
use crate::search::Outline;
use crate::types::{Article, Document, Table};

/// Grouping used for `tables`: one level, by position.
pub const TABLE_GROUPING: &[GroupKey] = &[GroupKey::Position];
/// Grouping used for `trees`: category, then position.
pub const TREE_GROUPING: &[GroupKey] = &[GroupKey::Category, GroupKey::Position];

/// What a record shows on screen.
#[derive(Debug)]
pub enum Contents<'a> {
    /// A freshly built, searchable outline.
    Outline(Outline),
    Article(&'a Article),
}

/// One displayable record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Article(Article),
    Table(Table),
    Tree(Table),
}

impl Record {
    pub fn title(&self) -> &str {
        match self {
            Record::Article(a) => &a.title,
            Record::Table(t) | Record::Tree(t) => &t.title,
        }
    }

    /// Grouping levels for this record's outline. Empty for articles.
    pub fn grouping(&self) -> &'static [GroupKey] {
        match self {
            Record::Article(_) => &[],
            Record::Table(_) => TABLE_GROUPING,
            Record::Tree(_) => TREE_GROUPING,
        }
    }

    pub fn contents(&self) -> Contents<'_> {
        match self {
            Record::Article(a) => Contents::Article(a),
            Record::Table(t) | Record::Tree(t) => {
                Contents::Outline(Outline::new(&t.title, t.rows.clone(), self.grouping()))
            }
        }
    }

    /// Build a fresh outline for a table or tree. Articles have none.
    pub fn outline(&self) -> Option<Outline> {
        match self.contents() {
            Contents::Outline(outline) => Some(outline),
            Contents::Article(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Record::Article(_) => "article",
            Record::Table(_) => "table",
            Record::Tree(_) => "tree",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Repository {
    records: Vec<Record>,
    by_title: HashMap<String, usize>,
}

impl Repository {
    /// A repository with nothing in it. Every lookup reports "not found".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(doc: Document) -> Self {
        let mut repo = Self::empty();
        let records = doc
            .articles
            .into_iter()
            .map(Record::Article)
            .chain(doc.tables.into_iter().map(Record::Table))
            .chain(doc.trees.into_iter().map(Record::Tree));
        for record in records {
            repo.insert(record);
        }
        tracing::debug!(records = repo.records.len(), "repository built");
        repo
    }

    fn insert(&mut self, record: Record) {
        match self.by_title.get(record.title()) {
            Some(&slot) => {
                tracing::debug!(title = record.title(), "duplicate title replaces earlier record");
                self.records[slot] = record;
            }
            None => {
                self.by_title.insert(record.title().to_string(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Find a record by title, logging a warning when it is missing.
    pub fn lookup(&self, title: &str) -> Option<&Record> {
        let found = self.by_title.get(title).map(|&slot| &self.records[slot]);
        if found.is_none() {
            tracing::warn!(title, "record not found");
        }
        found
    }

    /// Every title, in document order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::title)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entry;

    fn table(title: &str, techniques: &[&str]) -> Table {
        Table {
            title: title.into(),
            rows: techniques.iter().map(|t| Entry::new(*t)).collect(),
        }
    }

    fn doc() -> Document {
        Document {
            articles: vec![Article {
                title: "Intro".into(),
                items: Vec::new(),
            }],
            tables: vec![table("Guard", &["Scissor sweep"])],
            trees: vec![table("Curriculum", &["Armbar", "Kimura"])],
        }
    }

    #[test]
    fn lookup_finds_each_kind() {
        let repo = Repository::from_document(doc());
        assert_eq!(repo.lookup("Intro").map(Record::kind), Some("article"));
        assert_eq!(repo.lookup("Guard").map(Record::kind), Some("table"));
        assert_eq!(repo.lookup("Curriculum").map(Record::kind), Some("tree"));
    }

    #[test]
    fn missing_title_is_none() {
        let repo = Repository::from_document(doc());
        assert!(repo.lookup("Nope").is_none());
        assert!(Repository::empty().lookup("Guard").is_none());
    }

    #[test]
    fn titles_keep_document_order() {
        let repo = Repository::from_document(doc());
        assert_eq!(repo.titles().collect::<Vec<_>>(), vec!["Intro", "Guard", "Curriculum"]);
    }

    #[test]
    fn later_duplicate_wins_in_place() {
        let mut d = doc();
        d.trees.push(table("Guard", &["Hip bump"]));
        let repo = Repository::from_document(d);
        assert_eq!(repo.len(), 3);
        assert_eq!(repo.titles().collect::<Vec<_>>(), vec!["Intro", "Guard", "Curriculum"]);
        assert_eq!(repo.lookup("Guard").map(Record::kind), Some("tree"));
    }

    #[test]
    fn outlines_use_the_record_grouping() {
        let repo = Repository::from_document(doc());
        let table = repo.lookup("Guard").and_then(Record::outline).unwrap();
        let tree = repo.lookup("Curriculum").and_then(Record::outline).unwrap();
        assert_eq!(table.root().total, 1);
        assert_eq!(tree.root().total, 2);
        assert!(repo.lookup("Intro").and_then(Record::outline).is_none());
    }
}
