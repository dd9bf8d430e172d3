//! Loader — reads a page's YAML data file into a [`Document`].
//!
//! A page called `drills.html` (or just `drills`) keeps its data next to it
//! in `drills_data.yaml`; [`page_data_path`] derives that name. Loading is
//! one-shot: [`Repository::load`] either returns everything or, on any
//! failure, an empty repository and an error in the log.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::LoadError;
use crate::repository::Repository;
use crate::types::Document;

/// Page assumed when none is given.
pub const DEFAULT_PAGE: &str = "index.html";

/// Read and parse a data file.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse data file contents. An empty file is an empty document.
pub fn parse_document(text: &str) -> Result<Document, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Document::default());
    }
    serde_yaml::from_str(text)
}

impl Repository {
    /// Load a repository from `path`. Never fails: a missing or malformed
    /// file is logged and yields an empty repository.
    pub fn load(path: &Path) -> Self {
        match load_document(path) {
            Ok(doc) => Self::from_document(doc),
            Err(err) => {
                tracing::error!(error = %err, "failed to load page data");
                Self::empty()
            }
        }
    }
}

/// Derive the data file for `page`: strip any directory and extension from
/// the page name and append `suffix`. An empty page name means
/// [`DEFAULT_PAGE`].
pub fn page_data_path(page: &str, suffix: &str) -> PathBuf {
    let page = Path::new(page);
    let name = page
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_PAGE);
    let root = name.split('.').next().filter(|r| !r.is_empty()).unwrap_or("index");
    let file = format!("{root}{suffix}");
    match page.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file),
        _ => PathBuf::from(file),
    }
}

/// The file's modification date as `YYYY-MM-DD`, or `None` if it cannot be
/// read. Callers show "an unknown date" for `None`.
pub fn last_modified(path: &Path) -> Option<String> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn page_names_map_to_data_files() {
        assert_eq!(page_data_path("drills.html", "_data.yaml"), PathBuf::from("drills_data.yaml"));
        assert_eq!(page_data_path("drills", "_data.yaml"), PathBuf::from("drills_data.yaml"));
        assert_eq!(page_data_path("", "_data.yaml"), PathBuf::from("index_data.yaml"));
        assert_eq!(
            page_data_path("site/guard.html", "_data.yaml"),
            PathBuf::from("site/guard_data.yaml")
        );
    }

    #[test]
    fn empty_text_is_an_empty_document() {
        assert_eq!(parse_document("   \n").unwrap(), Document::default());
    }

    #[test]
    fn numeric_positions_keep_their_rows() {
        let doc = parse_document(
            "tables:\n  - title: Guard\n    rows:\n      - { technique: kimura, position: 1 }\n      - { technique: armbar, position: mount }\n",
        )
        .unwrap();
        let positions: Vec<&str> = doc.tables[0].rows.iter().map(|r| r.position.as_str()).collect();
        assert_eq!(positions, vec!["1", "mount"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_document(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn bad_yaml_is_a_yaml_error_and_an_empty_repository() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tables: [ {{ title: broken").unwrap();
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Yaml { .. }));
        assert!(Repository::load(file.path()).is_empty());
    }

    #[test]
    fn last_modified_is_iso_date() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let date = last_modified(file.path()).unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert!(last_modified(Path::new("/definitely/not/here.yaml")).is_none());
    }
}
