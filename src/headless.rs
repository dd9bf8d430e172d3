//! Headless mode — apply one query and print the result, no terminal UI.
//!
//! Every selected table or tree gets the query applied to a fresh outline.
//! Articles have nothing to search and are skipped.

use std::io::{self, Write};

use clap::ValueEnum;
use drillbook_core::{Children, GroupNode, Outline, Record, Repository};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented outline of the matching nodes.
    Text,
    /// One JSON object per matching technique.
    Json,
}

/// One line of `--format json` output.
#[derive(Debug, Serialize)]
struct JsonHit<'a> {
    table: &'a str,
    path: Vec<&'a str>,
    technique: &'a str,
}

/// Resolve `titles` (every record when empty), apply `query`, and write
/// the result to `out`. Unknown titles are reported on `err` and skipped.
pub fn run(
    repo: &Repository,
    titles: &[String],
    query: &str,
    format: Format,
    show_counts: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let mut first = true;
    for record in select(repo, titles, err)? {
        let Some(mut outline) = record.outline() else {
            tracing::debug!(title = record.title(), "headless: skipping article");
            continue;
        };
        outline.on_query_changed(query);

        match format {
            Format::Text => {
                if !first {
                    writeln!(out)?;
                }
                first = false;
                write_text(&outline, show_counts, out)?;
            }
            Format::Json => write_json(&outline, out)?,
        }
    }
    Ok(())
}

fn select<'a>(
    repo: &'a Repository,
    titles: &[String],
    err: &mut impl Write,
) -> io::Result<Vec<&'a Record>> {
    if titles.is_empty() {
        return Ok(repo.records().iter().collect());
    }
    let mut records = Vec::with_capacity(titles.len());
    for title in titles {
        match repo.lookup(title) {
            Some(record) => records.push(record),
            None => writeln!(err, "warning: no table, tree or article titled {title:?}")?,
        }
    }
    Ok(records)
}

/// Write every visible node, ignoring expansion: a search already opens
/// everything on the way to a match, and with no query the whole tree shows.
pub fn write_text(outline: &Outline, show_counts: bool, out: &mut impl Write) -> io::Result<()> {
    write_group(outline.root(), 0, show_counts, out)
}

fn write_group(
    node: &GroupNode,
    depth: usize,
    show_counts: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    if show_counts {
        writeln!(out, "{indent}{} ({})", node.key, node.count)?;
    } else {
        writeln!(out, "{indent}{}", node.key)?;
    }
    match &node.children {
        Children::Groups(groups) => {
            for group in groups.iter().filter(|g| g.visible) {
                write_group(group, depth + 1, show_counts, out)?;
            }
        }
        Children::Leaves(leaves) => {
            for leaf in leaves.iter().filter(|l| l.visible) {
                writeln!(out, "{indent}  - {}", leaf.entry.technique)?;
            }
        }
    }
    Ok(())
}

fn write_json(outline: &Outline, out: &mut impl Write) -> io::Result<()> {
    for hit in outline.hits() {
        let line = JsonHit {
            table: outline.title(),
            path: hit.groups,
            technique: &hit.entry.technique,
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}
