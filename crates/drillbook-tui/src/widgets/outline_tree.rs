//! Outline widget — the collapsible category/position/technique tree.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the displayed lines.
//! - `Enter` or `Space` toggles the node under the cursor.
//! - `→`/`l` opens the node under the cursor; `←`/`h` closes it.
//! - `PageUp`/`PageDown` move the cursor a page at a time.
//!
//! An open technique shows its detail sections inline beneath it. Detail
//! lines belong to their technique: toggling or closing on a detail line
//! acts on the technique that owns it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use drillbook_core::{NodePath, NodeRef, Outline};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Display lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// The outline title row.
    Title { expanded: bool, count: usize },
    Group { expanded: bool, count: usize },
    Technique { expanded: bool },
    Heading,
    Detail,
}

/// One line of the rendered outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// The node this line belongs to. Detail lines carry their technique's path.
    pub path: NodePath,
    pub depth: usize,
    pub kind: LineKind,
    pub text: String,
}

impl DisplayLine {
    fn is_node(&self) -> bool {
        matches!(
            self.kind,
            LineKind::Title { .. } | LineKind::Group { .. } | LineKind::Technique { .. }
        )
    }
}

/// Flatten an outline into display lines: node rows in order, with detail
/// sections under every open technique.
pub fn display_lines(outline: &Outline) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    for row in outline.rows() {
        match row.node {
            NodeRef::Group(group) => {
                let kind = if row.path.is_empty() {
                    LineKind::Title {
                        expanded: group.expanded,
                        count: group.count,
                    }
                } else {
                    LineKind::Group {
                        expanded: group.expanded,
                        count: group.count,
                    }
                };
                lines.push(DisplayLine {
                    path: row.path,
                    depth: row.depth,
                    kind,
                    text: group.key.clone(),
                });
            }
            NodeRef::Leaf(leaf) => {
                lines.push(DisplayLine {
                    path: row.path.clone(),
                    depth: row.depth,
                    kind: LineKind::Technique {
                        expanded: leaf.expanded,
                    },
                    text: leaf.entry.technique.clone(),
                });
                if !leaf.expanded {
                    continue;
                }
                for (heading, body) in leaf.entry.detail_sections() {
                    lines.push(DisplayLine {
                        path: row.path.clone(),
                        depth: row.depth + 1,
                        kind: LineKind::Heading,
                        text: heading.to_string(),
                    });
                    lines.extend(body.into_iter().map(|text| DisplayLine {
                        path: row.path.clone(),
                        depth: row.depth + 2,
                        kind: LineKind::Detail,
                        text,
                    }));
                }
            }
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OutlineState {
    pub outline: Outline,
    /// Index into [`display_lines`].
    pub cursor: usize,
}

impl OutlineState {
    pub fn new(outline: Outline) -> Self {
        Self { outline, cursor: 0 }
    }

    pub fn lines(&self) -> Vec<DisplayLine> {
        display_lines(&self.outline)
    }

    /// Path of the node owning the line under the cursor.
    fn cursor_path(&self) -> Option<NodePath> {
        self.lines().into_iter().nth(self.cursor).map(|l| l.path)
    }

    /// Re-run the search and keep the cursor in range.
    pub fn on_query_changed(&mut self, raw: &str) {
        self.outline.on_query_changed(raw);
        self.clamp_cursor();
    }

    /// Close everything, title row included.
    pub fn collapse_all(&mut self) {
        self.outline.collapse_all();
        self.cursor = 0;
    }

    /// Handle an [`AppEvent`], mutating state as appropriate.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Move(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "outline: cursor up");
            }
            AppEvent::Move(Direction::Down) => {
                let max = self.lines().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "outline: cursor down");
            }
            AppEvent::PageUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::PageDown => {
                self.cursor += PAGE_STEP;
                self.clamp_cursor();
            }
            AppEvent::Enter | AppEvent::Char(' ') => {
                if let Some(path) = self.cursor_path() {
                    self.outline.toggle(&path);
                    self.settle_on(&path);
                }
            }
            AppEvent::Move(Direction::Right) => {
                if let Some(path) = self.cursor_path() {
                    self.outline.set_expanded(&path, true);
                }
            }
            AppEvent::Move(Direction::Left) => {
                if let Some(path) = self.cursor_path() {
                    self.outline.set_expanded(&path, false);
                    self.settle_on(&path);
                }
            }
            _ => {}
        }
    }

    /// Put the cursor on the node row at `path`. Toggling from a detail line
    /// would otherwise leave the cursor on a line that no longer exists.
    fn settle_on(&mut self, path: &[usize]) {
        if let Some(row) = self
            .lines()
            .iter()
            .position(|l| l.is_node() && l.path == path)
        {
            self.cursor = row;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let max = self.lines().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct OutlineTree<'a> {
    state: &'a OutlineState,
    focused: bool,
    show_counts: bool,
    indent: u16,
    theme: &'a Theme,
}

impl<'a> OutlineTree<'a> {
    pub fn new(state: &'a OutlineState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            show_counts: true,
            indent: 2,
            theme,
        }
    }

    pub fn show_counts(mut self, show: bool) -> Self {
        self.show_counts = show;
        self
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    fn render_line(&self, line: &DisplayLine) -> Line<'static> {
        let pad = " ".repeat(self.indent as usize * line.depth);
        let searching = self.state.outline.is_searching();
        let count = |n: usize| {
            Span::styled(
                if self.show_counts { format!(" ({n})") } else { String::new() },
                self.theme.count,
            )
        };
        let chevron = |expanded: bool| Span::raw(drillbook_core::chevron(expanded));

        match &line.kind {
            LineKind::Title { expanded, count: n } => Line::from(vec![
                Span::raw(pad),
                chevron(*expanded),
                Span::styled(line.text.clone(), self.theme.title),
                count(*n),
            ]),
            LineKind::Group { expanded, count: n } => {
                let style = self.theme.group_style(&line.text).add_modifier(Modifier::BOLD);
                Line::from(vec![
                    Span::raw(pad),
                    chevron(*expanded),
                    Span::styled(line.text.clone(), style),
                    count(*n),
                ])
            }
            LineKind::Technique { expanded } => {
                let style = if searching {
                    self.theme.search_highlight
                } else {
                    self.theme.technique
                };
                Line::from(vec![
                    Span::raw(pad),
                    chevron(*expanded),
                    Span::styled(line.text.clone(), style),
                ])
            }
            LineKind::Heading => Line::from(vec![
                Span::raw(pad),
                Span::styled(line.text.clone(), self.theme.heading),
            ]),
            LineKind::Detail => Line::from(vec![
                Span::raw(pad),
                Span::styled(format!("• {}", line.text), self.theme.detail),
            ]),
        }
    }
}

impl Widget for OutlineTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.state.outline.title().to_string())
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .lines()
            .iter()
            .map(|line| ListItem::new(self.render_line(line)))
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
