//! drillbook TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod watch;
pub mod widgets;

use std::path::PathBuf;

use drillbook_core::config::Config;

pub use app::App;
pub use watch::{DataWatcher, WatchError};

/// Everything the TUI needs to start.
#[derive(Debug, Clone)]
pub struct Options {
    /// The page's YAML data file.
    pub data: PathBuf,
    /// Record titles to open as tabs, in order. Empty opens every record.
    pub titles: Vec<String>,
    /// Reload whenever the data file changes.
    pub watch: bool,
    pub config: Config,
}

/// Start the TUI and block until the user quits.
pub fn run(options: Options) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&options.config.ui.theme);
    let source = app::DataSource {
        path: options.data.clone(),
        titles: options.titles,
    };
    let state = app::AppState::load(source, options.config, theme);

    let mut app = App::new(state);
    if options.watch {
        app = app.with_watcher(DataWatcher::new(&options.data)?);
    }
    app.run()
}
