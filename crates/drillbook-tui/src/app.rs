//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{Command, CommandError},
    event::{self, AppEvent, KeyMode},
    theme::Theme,
    watch::DataWatcher,
    widgets::{
        article_view::{ArticleState, ArticleView},
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        outline_tree::{OutlineState, OutlineTree},
        query_bar::{QueryBar, QueryBarState},
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use drillbook_core::{config::Config, loader, Contents, Record, Repository};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::{io, path::PathBuf, time::Duration};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Outline,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone)]
pub enum TabView {
    Outline(OutlineState),
    Article(ArticleState),
}

/// One record on screen, with its own query.
#[derive(Debug, Clone)]
pub struct TabState {
    pub label: String,
    pub view: TabView,
    pub query: QueryBarState,
}

impl TabState {
    pub fn from_record(record: &Record) -> Self {
        let view = match record.contents() {
            Contents::Outline(outline) => TabView::Outline(OutlineState::new(outline)),
            Contents::Article(article) => TabView::Article(ArticleState::new(article.clone())),
        };
        Self {
            label: record.title().to_string(),
            view,
            query: QueryBarState::default(),
        }
    }

    pub fn is_outline(&self) -> bool {
        matches!(self.view, TabView::Outline(_))
    }

    pub fn is_searching(&self) -> bool {
        match &self.view {
            TabView::Outline(o) => o.outline.is_searching(),
            TabView::Article(_) => false,
        }
    }

    /// `(matching, total)` techniques while a search is active.
    pub fn matches(&self) -> Option<(usize, usize)> {
        match &self.view {
            TabView::Outline(o) if o.outline.is_searching() => {
                let root = o.outline.root();
                Some((root.count, root.total))
            }
            _ => None,
        }
    }

    /// Forward an editing key to the query bar and re-run the search if the
    /// text changed.
    pub fn handle_query(&mut self, event: &AppEvent) {
        if self.query.handle(event) {
            if let TabView::Outline(o) = &mut self.view {
                o.on_query_changed(self.query.query());
            }
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        if let TabView::Outline(o) = &mut self.view {
            o.on_query_changed("");
        }
    }

    pub fn collapse_all(&mut self) {
        match &mut self.view {
            TabView::Outline(o) => o.collapse_all(),
            TabView::Article(a) => a.collapse(),
        }
    }

    fn handle_view(&mut self, event: &AppEvent) {
        match &mut self.view {
            TabView::Outline(o) => o.handle(event),
            TabView::Article(a) => a.handle(event),
        }
    }
}

/// Where the tabs come from.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub path: PathBuf,
    /// Record titles to show, in order. Empty means every record.
    pub titles: Vec<String>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    pub source: DataSource,
    /// Data file date shown in the tab bar.
    pub last_modified: Option<String>,
}

impl AppState {
    /// Load the data file and open one tab per selected record.
    pub fn load(source: DataSource, config: Config, theme: Theme) -> Self {
        let mut state = AppState {
            tabs: Vec::new(),
            active_tab: 0,
            focus: Focus::Outline,
            prev_focus: Focus::Outline,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            source,
            last_modified: None,
        };
        state.reload();
        state
    }

    /// Re-read the data file and rebuild every tab from scratch. Queries,
    /// cursors and expansion state are discarded.
    pub fn reload(&mut self) {
        let repo = Repository::load(&self.source.path);
        self.tabs = build_tabs(&repo, &self.source.titles);
        self.active_tab = self.active_tab.min(self.tabs.len().saturating_sub(1));
        self.focus = Focus::Outline;
        self.prev_focus = Focus::Outline;
        self.last_modified = self.config.ui.show_last_modified.then(|| {
            loader::last_modified(&self.source.path)
                .unwrap_or_else(|| "an unknown date".to_string())
        });
        tracing::debug!(
            path = %self.source.path.display(),
            tabs = self.tabs.len(),
            "data reloaded"
        );
    }

    pub fn active(&self) -> Option<&TabState> {
        self.tabs.get(self.active_tab)
    }

    fn active_mut(&mut self) -> Option<&mut TabState> {
        self.tabs.get_mut(self.active_tab)
    }

    fn switch_tab(&mut self, forward: bool) {
        let n = self.tabs.len();
        if n == 0 {
            return;
        }
        self.active_tab = if forward {
            (self.active_tab + 1) % n
        } else {
            (self.active_tab + n - 1) % n
        };
        if self.focus == Focus::QueryBar && !self.active().is_some_and(TabState::is_outline) {
            self.focus = Focus::Outline;
        }
        tracing::debug!(tab = self.active_tab, "switched tab");
    }

    /// Route one semantic event through the application.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Enter => match self.command_bar.input.text().parse::<Command>() {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        cmd.run(self);
                    }
                    Err(CommandError::Empty) => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    // The bar stays open with the message.
                    Err(err) => self.command_bar.error = Some(err.to_string()),
                },
                AppEvent::Quit => self.quit = true,
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            // Leave the query bar; the query stays applied.
            AppEvent::Escape | AppEvent::Enter if self.focus == Focus::QueryBar => {
                tracing::debug!("focus: QueryBar -> Outline");
                self.focus = Focus::Outline;
            }

            AppEvent::CycleFocus => {
                let next = match self.focus {
                    Focus::Outline if self.active().is_some_and(TabState::is_outline) => {
                        Focus::QueryBar
                    }
                    _ => Focus::Outline,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::FocusQuery => {
                if self.active().is_some_and(TabState::is_outline) {
                    tracing::debug!("focus -> QueryBar");
                    self.focus = Focus::QueryBar;
                }
            }

            AppEvent::NextTab => self.switch_tab(true),
            AppEvent::PrevTab => self.switch_tab(false),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => {
                let focus = self.focus;
                if let Some(tab) = self.active_mut() {
                    match focus {
                        Focus::QueryBar => tab.handle_query(&other),
                        Focus::Outline => tab.handle_view(&other),
                        Focus::Command => {} // handled above
                    }
                }
            }
        }
    }
}

fn build_tabs(repo: &Repository, titles: &[String]) -> Vec<TabState> {
    if titles.is_empty() {
        return repo.records().iter().map(TabState::from_record).collect();
    }
    titles
        .iter()
        .filter_map(|title| repo.lookup(title))
        .map(TabState::from_record)
        .collect()
}

impl Focus {
    /// Text inputs take letters as text; everything else as shortcuts.
    fn key_mode(self) -> KeyMode {
        match self {
            Focus::QueryBar | Focus::Command => KeyMode::Insert,
            Focus::Outline => KeyMode::Normal,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    watcher: Option<DataWatcher>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        App {
            state,
            watcher: None,
        }
    }

    /// Reload whenever `watcher` reports a change to the data file.
    pub fn with_watcher(mut self, watcher: DataWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if self.watcher.as_ref().is_some_and(DataWatcher::changed) {
                tracing::debug!("data file changed on disk");
                self.state.reload();
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                // Terminals with enhanced keyboard reporting also send releases.
                if matches!(&raw, Event::Key(key) if key.kind != KeyEventKind::Press) {
                    continue;
                }
                if let Some(ev) = event::map_event(&raw, self.state.focus.key_mode()) {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(
        TabBar::new(&state.tabs, state.active_tab, &state.theme)
            .last_modified(state.last_modified.as_deref()),
        vert[0],
    );

    let Some(tab) = state.active() else {
        let msg = format!("no records in {}", state.source.path.display());
        frame.render_widget(
            Paragraph::new(Line::from(msg))
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(Block::bordered().border_style(state.theme.border_unfocused)),
            vert[1],
        );
        draw_overlays(frame, state, area);
        return;
    };

    let body_focused = state.focus == Focus::Outline;
    match &tab.view {
        TabView::Outline(o) => frame.render_widget(
            OutlineTree::new(o, body_focused, &state.theme)
                .show_counts(state.config.ui.show_counts)
                .indent(state.config.ui.indent),
            vert[1],
        ),
        TabView::Article(a) => {
            frame.render_widget(ArticleView::new(a, body_focused, &state.theme), vert[1])
        }
    }
    frame.render_widget(
        QueryBar::new(&tab.query, state.focus == Focus::QueryBar, &state.theme)
            .matches(tab.matches()),
        vert[2],
    );

    if draw_overlays(frame, state, area) {
        return; // cursor is set; skip query-bar cursor below
    }

    // Position the terminal cursor when the query bar is focused
    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&tab.query, true, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[2]);
        frame.set_cursor_position((cx, cy));
    }
}

/// Help popup and command bar. Returns `true` if the command bar placed the
/// terminal cursor.
fn draw_overlays(frame: &mut Frame, state: &AppState, area: Rect) -> bool {
    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return true;
    }
    false
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
