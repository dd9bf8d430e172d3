//! The `?` overlay: key bindings, `:` commands and query syntax.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const WIDTH: u16 = 64;

/// `(heading, [(keys, meaning)])`
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Keys",
        &[
            ("q, Ctrl+c", "quit"),
            ("] [", "next / previous tab"),
            ("Tab", "switch between outline and query"),
            ("/", "type a query"),
            ("Esc", "leave the query bar"),
            ("↑↓ j k", "move"),
            ("←→ h l", "close / open"),
            ("Enter, Space", "toggle the node under the cursor"),
            ("PgUp PgDn", "page (also Ctrl+u, Ctrl+d)"),
            (":", "command line"),
            ("?", "this help"),
        ],
    ),
    (
        "Commands",
        &[
            (":theme <name>", "default or gruvbox"),
            (":clear", "empty the query"),
            (":collapse", "close everything"),
            (":counts", "toggle match counts"),
            (":reload, :e", "re-read the data file"),
        ],
    ),
    (
        "Query",
        &[
            ("a b", "both a and b"),
            ("a or b", "either"),
            ("not a", "anything without a"),
        ],
    ),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let key_style = self.theme.detail.add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();
        for (i, (heading, rows)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::styled(format!(" {heading}"), self.theme.heading));
            lines.extend(rows.iter().map(|(keys, meaning)| {
                Line::from(vec![
                    Span::styled(format!("   {keys:<16}"), key_style),
                    Span::raw(*meaning),
                ])
            }));
        }
        lines
    }
}

/// Rows needed to show every section inside a border.
fn content_height() -> u16 {
    let rows: usize = SECTIONS.iter().map(|(_, rows)| rows.len() + 1).sum();
    (rows + SECTIONS.len() - 1 + 2) as u16
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centred(area, WIDTH, content_height());
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" help ")
            .title_bottom(Line::from(" ? or Esc to close ").right_aligned())
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(self.lines()).render(inner, buf);
    }
}

fn centred(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
