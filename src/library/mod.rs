//! Content library: the items and the catalog that owns them.
//!
//! ```text
//! Catalog
//! └── items (insertion order)
//!     ├── ContentItem { Article { body } }
//!     └── ContentItem { Multimedia { media_url } }
//! ```

pub mod catalog;
pub mod content;

pub use catalog::{Catalog, CatalogError, PopularityEntry, DEFAULT_EVENT_CAPACITY};
pub use content::{ContentItem, ContentKind, Payload, Popularity};
