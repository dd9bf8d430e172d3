//! Query bar: the per-tab search input at the bottom of the screen.
//!
//! Terms are space separated. `or` between two terms makes them
//! alternatives; `not` before a term excludes it. Every edit re-runs the
//! search on the tab's outline.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

#[derive(Debug, Default, Clone)]
pub struct QueryBarState {
    input: LineInput,
}

impl QueryBarState {
    pub fn query(&self) -> &str {
        self.input.text()
    }

    /// Returns `true` when the query text changed and the outline needs
    /// recomputing.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let changed = self.input.edit(event);
        if changed {
            tracing::debug!(query = %self.input.text(), "query edited");
        }
        changed
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// `(matching, total)` techniques in the active outline.
    matches: Option<(usize, usize)>,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            matches: None,
            theme,
        }
    }

    pub fn matches(mut self, matches: Option<(usize, usize)>) -> Self {
        self.matches = matches;
        self
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // Inside the 1-cell border.
        let x = (area.x + 1 + self.state.input.cursor_column()).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Query")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(20)])
            .split(inner);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let query_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search", dim))
        } else {
            Line::from(self.state.query())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        if let Some((count, total)) = self.matches {
            Paragraph::new(Line::from(Span::styled(
                format!("{count}/{total} matches"),
                self.theme.count,
            )))
            .right_aligned()
            .render(chunks[1], buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
