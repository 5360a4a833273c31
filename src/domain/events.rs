//! Catalog notifications.
//!
//! Every observable catalog operation leaves a [`CatalogEvent`] behind so a UI
//! or log sink can surface what happened without parsing log lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::library::ContentKind;

/// A single notification emitted by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEvent {
    /// Unique identifier for this event
    pub id: Uuid,

    /// When this event occurred
    pub timestamp: DateTime<Utc>,

    /// What happened
    pub event_type: CatalogEventType,

    /// Title the operation targeted
    pub title: String,

    /// Kind of the affected item (absent when nothing matched)
    pub kind: Option<ContentKind>,

    /// Human-readable summary
    pub summary: String,
}

impl CatalogEvent {
    /// Create a new event with the current timestamp
    pub fn new(
        event_type: CatalogEventType,
        title: impl Into<String>,
        kind: Option<ContentKind>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            title: title.into(),
            kind,
            summary: summary.into(),
        }
    }

    /// Whether this event reports a rejected operation
    pub fn is_failure(&self) -> bool {
        self.event_type.is_failure()
    }
}

/// Types of catalog notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEventType {
    /// An item was registered
    Added,

    /// An item's title/author/payload was overwritten
    Updated,

    /// An item was removed
    Deleted,

    /// A lookup by title matched nothing
    NotFound,

    /// An update was rejected because the kinds differ
    VariantMismatch,
}

impl CatalogEventType {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NotFound | Self::VariantMismatch)
    }
}
