//! Domain types shared across the catalog.
//!
//! - Events: notifications emitted by catalog operations

pub mod events;

pub use events::{CatalogEvent, CatalogEventType};
