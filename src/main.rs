use std::path::PathBuf;

use clap::Parser;
use drillbook::headless::{self, Format};
use drillbook_core::{config::Config, loader, Repository};

#[derive(Parser)]
#[command(name = "drillbook", about = "Drillbook — browse and filter technique tables")]
struct Cli {
    /// Page to open; its data lives in `<page><suffix>` (default `index.html`).
    page: Option<String>,

    /// Read this data file instead of deriving it from the page name.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Only show records with this title (repeatable, keeps the given order).
    #[arg(long = "title", short = 't')]
    titles: Vec<String>,

    /// Run headless: apply this query and print the matches.
    #[arg(long, short = 'q')]
    query: Option<String>,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Reload the TUI whenever the data file changes.
    #[arg(long)]
    watch: bool,

    /// Write debug logs to /tmp/drillbook-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/drillbook-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("drillbook debug log started — tail -f /tmp/drillbook-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    let data = cli.data.unwrap_or_else(|| {
        let page = cli.page.as_deref().unwrap_or(loader::DEFAULT_PAGE);
        loader::page_data_path(page, &config.data.suffix)
    });

    match cli.query {
        Some(query) => {
            let repo = match loader::load_document(&data) {
                Ok(doc) => Repository::from_document(doc),
                Err(err) => {
                    eprintln!("warning: {err}");
                    Repository::empty()
                }
            };
            headless::run(
                &repo,
                &cli.titles,
                &query,
                cli.format,
                config.ui.show_counts,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )?;
            Ok(())
        }
        None => drillbook_tui::run(drillbook_tui::Options {
            data,
            titles: cli.titles,
            watch: cli.watch,
            config,
        }),
    }
}
