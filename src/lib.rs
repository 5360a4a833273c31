//! cms - In-memory content catalog
//!
//! Keeps articles and multimedia entries in a single ordered list and tracks
//! views, likes and comments for each of them.
//!
//! # Modules
//!
//! - `library`: Content items and the catalog that owns them
//! - `domain`: Notifications emitted by catalog operations
//! - `core`: YAML scripts and the session that replays them
//! - `config`: Display configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Replay the built-in walkthrough
//! cms demo
//!
//! # Run your own script and dump the popularity report
//! cms run demos/walkthrough.yaml --json
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use crate::core::{Script, Session, SessionReport};
pub use domain::{CatalogEvent, CatalogEventType};
pub use library::{
    Catalog, CatalogError, ContentItem, ContentKind, Payload, Popularity, PopularityEntry,
};
