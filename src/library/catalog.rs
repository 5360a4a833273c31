//! Catalog of content items.
//!
//! An ordered, in-memory list of [`ContentItem`]s keyed by title. Lookups are
//! a linear scan and the first match wins, so a later item with a duplicate
//! title is shadowed by an earlier one.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{CatalogEvent, CatalogEventType};

use super::content::{ContentItem, ContentKind, Popularity};

/// Non-fatal catalog failures. The catalog is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Content with title '{title}' not found.")]
    NotFound { title: String },

    #[error("Cannot update content of type '{existing}' with content of type '{replacement}'")]
    VariantMismatch {
        existing: ContentKind,
        replacement: ContentKind,
    },
}

/// Pending notifications kept by default before the oldest are dropped
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Catalog of all registered content
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Registered items in insertion order
    items: Vec<ContentItem>,

    /// Notifications not yet taken by a caller, oldest first
    events: VecDeque<CatalogEvent>,

    /// Maximum number of pending notifications
    event_capacity: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a catalog that keeps at most `capacity` pending notifications.
    /// A capacity of zero disables the notification log.
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            events: VecDeque::new(),
            event_capacity: capacity,
        }
    }

    /// Register an item at the end of the catalog
    pub fn add(&mut self, item: ContentItem) {
        let kind = item.kind();
        let title = item.title().to_string();
        info!(%kind, %title, "Content added");

        self.items.push(item);
        self.record(CatalogEvent::new(
            CatalogEventType::Added,
            title.clone(),
            Some(kind),
            format!("{} added: {}", kind, title),
        ));
    }

    /// Get the first item with the given title
    pub fn find(&self, title: &str) -> Result<&ContentItem, CatalogError> {
        match self.position(title) {
            Some(idx) => Ok(&self.items[idx]),
            None => {
                warn!(%title, "Content not found");
                Err(not_found(title))
            }
        }
    }

    /// Get the first item with the given title for recording engagement
    pub fn find_mut(&mut self, title: &str) -> Result<&mut ContentItem, CatalogError> {
        match self.position(title) {
            Some(idx) => Ok(&mut self.items[idx]),
            None => Err(self.reject_missing(title)),
        }
    }

    /// Overwrite title, author and payload of the item called `title`.
    ///
    /// Fails without touching anything when no item matches or when the
    /// replacement is of a different kind than the existing item.
    pub fn update(&mut self, title: &str, replacement: ContentItem) -> Result<(), CatalogError> {
        let Some(idx) = self.position(title) else {
            return Err(self.reject_missing(title));
        };

        let existing = self.items[idx].kind();
        let incoming = replacement.kind();
        if existing != incoming {
            let err = CatalogError::VariantMismatch {
                existing,
                replacement: incoming,
            };
            warn!(%title, %existing, replacement = %incoming, "Update rejected: kind mismatch");
            self.record(CatalogEvent::new(
                CatalogEventType::VariantMismatch,
                title,
                Some(existing),
                err.to_string(),
            ));
            return Err(err);
        }

        self.items[idx].apply_update(replacement);
        info!(%title, new_title = %self.items[idx].title(), "Content updated");
        self.record(CatalogEvent::new(
            CatalogEventType::Updated,
            title,
            Some(existing),
            format!("Content '{}' updated.", title),
        ));
        Ok(())
    }

    /// Remove the first item called `title`, preserving the order of the rest
    pub fn delete(&mut self, title: &str) -> Result<ContentItem, CatalogError> {
        let Some(idx) = self.position(title) else {
            return Err(self.reject_missing(title));
        };

        let removed = self.items.remove(idx);
        info!(%title, kind = %removed.kind(), "Content deleted");
        self.record(CatalogEvent::new(
            CatalogEventType::Deleted,
            title,
            Some(removed.kind()),
            format!("Content '{}' deleted.", title),
        ));
        Ok(removed)
    }

    /// All items in catalog order
    pub fn list_all(&self) -> impl Iterator<Item = &ContentItem> + '_ {
        self.items.iter()
    }

    /// One engagement entry per item, in catalog order
    pub fn popularity_report(&self) -> impl Iterator<Item = PopularityEntry> + '_ {
        self.items.iter().map(PopularityEntry::from)
    }

    /// Search items by query (case-insensitive substring of title or author)
    pub fn search(&self, query: &str) -> Vec<&ContentItem> {
        let query_lower = query.to_lowercase();

        self.items
            .iter()
            .filter(|item| {
                item.title().to_lowercase().contains(&query_lower)
                    || item.author().to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Filter items by kind
    pub fn filter_by_kind(&self, kind: ContentKind) -> Vec<&ContentItem> {
        self.items.iter().filter(|item| item.kind() == kind).collect()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Notifications emitted since the last [`Catalog::take_events`], oldest
    /// first. Only the newest `event_capacity` are kept.
    pub fn events(&self) -> &VecDeque<CatalogEvent> {
        &self.events
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<CatalogEvent> {
        self.events.drain(..).collect()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title() == title)
    }

    fn reject_missing(&mut self, title: &str) -> CatalogError {
        let err = not_found(title);
        warn!(%title, "Content not found");
        self.record(CatalogEvent::new(
            CatalogEventType::NotFound,
            title,
            None,
            err.to_string(),
        ));
        err
    }

    fn record(&mut self, event: CatalogEvent) {
        if self.event_capacity == 0 {
            return;
        }
        if self.events.len() == self.event_capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

fn not_found(title: &str) -> CatalogError {
    CatalogError::NotFound {
        title: title.to_string(),
    }
}

/// A single line of the popularity report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityEntry {
    pub title: String,

    #[serde(flatten)]
    pub popularity: Popularity,
}

impl From<&ContentItem> for PopularityEntry {
    fn from(item: &ContentItem) -> Self {
        Self {
            title: item.title().to_string(),
            popularity: item.popularity(),
        }
    }
}

impl std::fmt::Display for PopularityEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Views={}, Likes={}, Comments={}",
            self.title,
            self.popularity.views,
            self.popularity.likes,
            self.popularity.comment_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(ContentItem::article(
            "Understanding AI",
            "Alice",
            "This is an article about AI.",
        ));
        catalog.add(ContentItem::multimedia(
            "AI in Action",
            "Bob",
            "https://media.url/ai_video",
        ));
        catalog
    }

    #[test]
    fn test_catalog_add_and_find() {
        let catalog = sample_catalog();

        assert_eq!(catalog.len(), 2);
        let found = catalog.find("AI in Action").unwrap();
        assert_eq!(found.kind(), ContentKind::Multimedia);
        assert_eq!(found.author(), "Bob");
    }

    #[test]
    fn test_find_missing_title() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.find("Nope").unwrap_err(),
            CatalogError::NotFound {
                title: "Nope".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_titles_first_match_wins() {
        let mut catalog = Catalog::new();
        catalog.add(ContentItem::article("Same", "First", "a"));
        catalog.add(ContentItem::article("Same", "Second", "b"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("Same").unwrap().author(), "First");

        catalog.delete("Same").unwrap();
        assert_eq!(catalog.find("Same").unwrap().author(), "Second");
    }

    #[test]
    fn test_add_emits_notification() {
        let catalog = sample_catalog();
        let events = catalog.events();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, CatalogEventType::Added);
        assert_eq!(events[0].kind, Some(ContentKind::Article));
        assert_eq!(events[0].summary, "Article added: Understanding AI");
        assert_eq!(events[1].summary, "Multimedia added: AI in Action");
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut catalog = Catalog::with_event_capacity(8);
        for i in 0..1_000 {
            let title = format!("item-{}", i);
            catalog.add(ContentItem::article(title.as_str(), "A", "body"));
            catalog.delete(&title).unwrap();
        }

        assert!(catalog.is_empty());
        assert_eq!(catalog.events().len(), 8);
        assert_eq!(catalog.events()[7].summary, "Content 'item-999' deleted.");
        assert_eq!(catalog.events()[0].summary, "Article added: item-996");
    }

    #[test]
    fn test_default_event_capacity() {
        let mut catalog = Catalog::new();
        for _ in 0..(DEFAULT_EVENT_CAPACITY + 10) {
            let _ = catalog.delete("ghost");
        }
        assert_eq!(catalog.events().len(), DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_disables_log() {
        let mut catalog = Catalog::with_event_capacity(0);
        catalog.add(ContentItem::article("T", "A", "body"));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.events().is_empty());
    }

    #[test]
    fn test_update_variant_mismatch_is_noop() {
        let mut catalog = sample_catalog();
        catalog.take_events();

        let result = catalog.update(
            "AI in Action",
            ContentItem::article("Hijacked", "Mallory", "text"),
        );

        assert_eq!(
            result,
            Err(CatalogError::VariantMismatch {
                existing: ContentKind::Multimedia,
                replacement: ContentKind::Article,
            })
        );
        let item = catalog.find("AI in Action").unwrap();
        assert_eq!(item.author(), "Bob");
        assert_eq!(item.media_url(), Some("https://media.url/ai_video"));

        let events = catalog.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, CatalogEventType::VariantMismatch);
        assert_eq!(
            events[0].summary,
            "Cannot update content of type 'Multimedia' with content of type 'Article'"
        );
    }

    #[test]
    fn test_update_same_kind() {
        let mut catalog = sample_catalog();
        catalog.find_mut("Understanding AI").unwrap().record_view();

        catalog
            .update(
                "Understanding AI",
                ContentItem::article(
                    "Understanding AI - Revised",
                    "Alice",
                    "Updated article about AI.",
                ),
            )
            .unwrap();

        assert!(catalog.find("Understanding AI").is_err());
        let item = catalog.find("Understanding AI - Revised").unwrap();
        assert_eq!(item.body(), Some("Updated article about AI."));
        assert_eq!(item.popularity().views, 1);
    }

    #[test]
    fn test_update_missing_title() {
        let mut catalog = sample_catalog();
        catalog.take_events();

        let result = catalog.update("Ghost", ContentItem::article("Ghost", "X", "y"));
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.events()[0].event_type, CatalogEventType::NotFound);
        assert_eq!(catalog.events()[0].kind, None);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut catalog = Catalog::new();
        for title in ["a", "b", "c", "d"] {
            catalog.add(ContentItem::article(title, "X", "body"));
        }

        let removed = catalog.delete("b").unwrap();
        assert_eq!(removed.title(), "b");

        let titles: Vec<&str> = catalog.list_all().map(|i| i.title()).collect();
        assert_eq!(titles, ["a", "c", "d"]);
    }

    #[test]
    fn test_delete_missing_title() {
        let mut catalog = sample_catalog();
        let result = catalog.delete("Ghost");

        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_list_all_is_restartable() {
        let catalog = sample_catalog();

        let first: Vec<&str> = catalog.list_all().map(|i| i.title()).collect();
        let second: Vec<&str> = catalog.list_all().map(|i| i.title()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_popularity_report_lines() {
        let mut catalog = sample_catalog();
        {
            let item = catalog.find_mut("AI in Action").unwrap();
            item.record_view();
            item.record_like();
            item.add_comment("Awesome video!");
        }

        let lines: Vec<String> = catalog.popularity_report().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            [
                "Understanding AI: Views=0, Likes=0, Comments=0",
                "AI in Action: Views=1, Likes=1, Comments=1",
            ]
        );
    }

    #[test]
    fn test_popularity_entry_json() {
        let catalog = sample_catalog();
        let entry = catalog.popularity_report().next().unwrap();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["title"], "Understanding AI");
        assert_eq!(json["views"], 0);
        assert_eq!(json["comment_count"], 0);
    }

    #[test]
    fn test_catalog_search() {
        let catalog = sample_catalog();

        assert_eq!(catalog.search("ai").len(), 2);
        assert_eq!(catalog.search("BOB").len(), 1);
        assert_eq!(catalog.search("python").len(), 0);
    }

    #[test]
    fn test_catalog_filter_by_kind() {
        let catalog = sample_catalog();

        assert_eq!(catalog.filter_by_kind(ContentKind::Article).len(), 1);
        assert_eq!(catalog.filter_by_kind(ContentKind::Multimedia).len(), 1);
    }
}
