//! Ratatui widgets for the drillbook TUI.

pub mod article_view;
pub mod command_bar;
pub mod help;
pub mod line_input;
pub mod outline_tree;
pub mod query_bar;
pub mod tab_bar;
