//! drillbook — browse and filter technique reference tables.
//!
//! A page's data file (`<page>_data.yaml`) holds articles, flat tables and
//! category trees. The TUI shows each as a tab; `--query` runs headless and
//! prints the matches instead.
//!
//! # Architecture
//!
//! ```text
//! drillbook-core (load, build, search) ──► drillbook-tui (interactive)
//!                                     └──► headless (one query, stdout)
//! ```

pub mod headless;
