//! One tab per table or tree, plus the file date and key hints.

use crate::app::TabState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// A `●` after a label marks a tab whose query is not empty.
pub struct TabBar<'a> {
    tabs: &'a [TabState],
    active: usize,
    last_modified: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [TabState], active: usize, theme: &'a Theme) -> Self {
        Self {
            tabs,
            active,
            last_modified: None,
            theme,
        }
    }

    /// Show "updated <date>" next to the hints.
    pub fn last_modified(mut self, date: Option<&'a str>) -> Self {
        self.last_modified = date;
        self
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .tabs
            .iter()
            .map(|tab| {
                let marker = if tab.is_searching() { " ●" } else { "" };
                Line::from(format!(" {}{} ", tab.label, marker))
            })
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .style(self.theme.border_unfocused)
            .highlight_style(self.theme.title.add_modifier(Modifier::REVERSED))
            .divider("")
            .render(area, buf);

        let mut hint = String::from(" ");
        if let Some(date) = self.last_modified {
            hint.push_str(&format!("updated {date}  "));
        }
        hint.push_str("q:quit  ?:help ");
        Line::styled(hint, Style::default().add_modifier(Modifier::DIM))
            .right_aligned()
            .render(area, buf);
    }
}
