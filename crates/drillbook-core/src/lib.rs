//! drillbook-core — data model and search engine for drillbook.
//!
//! This crate holds everything that does not touch the terminal: the YAML
//! document model, the title-indexed [`Repository`], and the outline engine
//! that the TUI and headless mode both drive.
//!
//! # Architecture
//!
//! ```text
//! Loader ──► Repository ──► Hierarchy ──► Outline ◄── Query
//!                                            │
//!                                            └──► rows / hits (rendering)
//! ```
//!
//! Everything here is synchronous and single-threaded. An [`Outline`] is only
//! ever mutated by the one event handler that owns it.

pub mod collapse;
pub mod config;
pub mod dates;
pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod query;
pub mod repository;
pub mod search;
pub mod types;

pub use collapse::{chevron, NodePath, NodeRef};
pub use error::LoadError;
pub use hierarchy::{Children, GroupKey, GroupNode, Leaf};
pub use query::{matches_search, Query};
pub use repository::{Contents, Record, Repository};
pub use search::{Hit, Outline, Row};
pub use types::{Article, Document, Entry, Item, Link, Part, Table, Video};
