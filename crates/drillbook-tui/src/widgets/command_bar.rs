//! The `:` prompt on the bottom row. `:` opens it outside the query bar,
//! `Enter` runs the line as a [`crate::commands::Command`] and `Esc` drops it.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: LineInput,
    /// Message from the last command that failed to parse. Any key clears it.
    pub error: Option<String>,
}

impl CommandBarState {
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Editing keys only; the app shell owns `Enter` and `Escape`.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.edit(event);
    }

    /// Terminal column for the text cursor, after the `:` prompt.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor_column()).min(area.right().saturating_sub(1))
    }
}

/// Draws into the first row of `area`: the error if there is one, else the
/// prompt.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let line = match &self.state.error {
            Some(err) => Line::styled(
                format!("error: {err}"),
                self.theme.detail.fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar),
                Span::raw(self.state.input.text()),
            ]),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
