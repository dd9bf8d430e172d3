//! Article view — a title row that opens onto paragraphs and links.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `Enter` / `Space` | Open or close the article |
//! | `→` / `l`, `←` / `h` | Open / close |
//! | `↑` / `k`, `↓` / `j` | Scroll one line |
//! | `PageUp` / `PageDown` | Scroll one page |
//!
//! Links render as `label <url>`. Items that are neither text, a link, nor a
//! list of those were kept by the loader as unsupported and are skipped here.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use drillbook_core::{chevron, Article, Item, Link, Part};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ArticleState {
    pub article: Article,
    pub expanded: bool,
    /// Lines scrolled off the top.
    pub scroll: usize,
}

impl ArticleState {
    pub fn new(article: Article) -> Self {
        Self {
            article,
            expanded: false,
            scroll: 0,
        }
    }

    /// Rendered line count: the title plus one per displayable item when open.
    fn line_count(&self) -> usize {
        if self.expanded {
            1 + self.article.items.iter().filter(|i| is_displayable(i)).count()
        } else {
            1
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Enter | AppEvent::Char(' ') => self.set_expanded(!self.expanded),
            AppEvent::Move(Direction::Right) => self.set_expanded(true),
            AppEvent::Move(Direction::Left) => self.set_expanded(false),
            AppEvent::Move(Direction::Up) => self.scroll_by(-1),
            AppEvent::Move(Direction::Down) => self.scroll_by(1),
            AppEvent::PageUp => self.scroll_by(-(PAGE_STEP as isize)),
            AppEvent::PageDown => self.scroll_by(PAGE_STEP as isize),
            _ => {}
        }
    }

    /// Close the article and scroll back to the title.
    pub fn collapse(&mut self) {
        self.set_expanded(false);
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.scroll = 0;
        tracing::debug!(title = %self.article.title, expanded, "article: toggle");
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

fn is_displayable(item: &Item) -> bool {
    !matches!(item, Item::Unsupported(_))
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn link_spans(link: &Link, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled(link.label.clone(), theme.link),
        Span::styled(format!(" <{}>", link.url), theme.detail),
    ]
}

/// Render one article item, or `None` for unsupported shapes.
pub fn item_line(item: &Item, theme: &Theme) -> Option<Line<'static>> {
    match item {
        Item::Text(text) => Some(Line::from(text.clone())),
        Item::Link(link) => Some(Line::from(link_spans(link, theme))),
        Item::Parts(parts) => {
            let spans = parts
                .iter()
                .flat_map(|part| match part {
                    Part::Text(text) => vec![Span::raw(text.clone())],
                    Part::Link(link) => link_spans(link, theme),
                    Part::Unsupported(_) => Vec::new(),
                })
                .collect::<Vec<_>>();
            Some(Line::from(spans))
        }
        Item::Unsupported(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ArticleView<'a> {
    state: &'a ArticleState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ArticleView<'a> {
    pub fn new(state: &'a ArticleState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

impl Widget for ArticleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.state.article.title.clone())
            .border_style(border_style);

        let mut lines = vec![Line::from(vec![
            Span::raw(chevron(self.state.expanded)),
            Span::styled(self.state.article.title.clone(), self.theme.title),
        ])];
        if self.state.expanded {
            lines.extend(
                self.state
                    .article
                    .items
                    .iter()
                    .filter_map(|item| item_line(item, self.theme)),
            );
        }

        let scroll = u16::try_from(self.state.scroll).unwrap_or(u16::MAX);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            title: "Principles".into(),
            items: vec![
                Item::Text("Posture before submissions.".into()),
                Item::Link(Link {
                    label: "Frames".into(),
                    url: "https://example.com/frames".into(),
                }),
                Item::Unsupported(serde_yaml::Value::Bool(true)),
                Item::Parts(vec![
                    Part::Text("See ".into()),
                    Part::Link(Link {
                        label: "this".into(),
                        url: "https://example.com".into(),
                    }),
                ]),
            ],
        }
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn links_render_with_their_url() {
        let theme = Theme::load_default();
        let a = article();
        let rendered: Vec<String> = a
            .items
            .iter()
            .filter_map(|i| item_line(i, &theme))
            .map(|l| plain(&l))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "Posture before submissions.",
                "Frames <https://example.com/frames>",
                "See this <https://example.com>",
            ]
        );
    }

    #[test]
    fn toggling_opens_and_resets_scroll() {
        let mut s = ArticleState::new(article());
        assert_eq!(s.line_count(), 1);
        s.handle(&AppEvent::Enter);
        assert!(s.expanded);
        assert_eq!(s.line_count(), 4);
        s.handle(&AppEvent::Move(Direction::Down));
        s.handle(&AppEvent::Move(Direction::Down));
        assert_eq!(s.scroll, 2);
        s.handle(&AppEvent::Char(' '));
        assert!(!s.expanded);
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn collapse_closes_and_scrolls_home() {
        let mut s = ArticleState::new(article());
        s.handle(&AppEvent::Move(Direction::Right));
        s.handle(&AppEvent::Move(Direction::Down));
        s.collapse();
        assert!(!s.expanded);
        assert_eq!(s.scroll, 0);
        s.collapse();
        assert!(!s.expanded);
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut s = ArticleState::new(article());
        s.handle(&AppEvent::Move(Direction::Right));
        s.handle(&AppEvent::PageDown);
        assert_eq!(s.scroll, 3);
        s.handle(&AppEvent::PageUp);
        assert_eq!(s.scroll, 0);
    }
}
