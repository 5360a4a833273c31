//! Content items held by the catalog.
//!
//! A [`ContentItem`] is one piece of content (an article or a multimedia
//! entry) together with its engagement counters and comment log. The
//! variant-specific data lives in [`Payload`]; the kind of an item is derived
//! from its payload and never changes after construction.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DisplaySettings;

/// Kind of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Written article with a text body
    Article,

    /// Video/audio/image entry pointing at a media URL
    #[serde(alias = "media", alias = "video")]
    Multimedia,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Article => write!(f, "Article"),
            ContentKind::Multimedia => write!(f, "Multimedia"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "article" => Ok(ContentKind::Article),
            "multimedia" | "media" | "video" => Ok(ContentKind::Multimedia),
            _ => anyhow::bail!("Unknown content kind: {}", s),
        }
    }
}

/// Variant-specific data of a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Article { body: String },
    #[serde(alias = "media", alias = "video")]
    Multimedia { media_url: String },
}

impl Payload {
    /// The kind this payload belongs to
    pub fn kind(&self) -> ContentKind {
        match self {
            Payload::Article { .. } => ContentKind::Article,
            Payload::Multimedia { .. } => ContentKind::Multimedia,
        }
    }
}

/// Engagement snapshot of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Popularity {
    pub views: u64,
    pub likes: u64,
    pub comment_count: usize,
}

/// A piece of content with its engagement counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Lookup key within a catalog (not required to be unique)
    title: String,

    author: String,

    #[serde(flatten)]
    payload: Payload,

    views: u64,

    likes: u64,

    /// Comments in the order they were posted
    #[serde(default)]
    comments: Vec<String>,

    /// When the item was created
    created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a new item with zeroed counters
    pub fn new(title: impl Into<String>, author: impl Into<String>, payload: Payload) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            payload,
            views: 0,
            likes: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a new article
    pub fn article(
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new(title, author, Payload::Article { body: body.into() })
    }

    /// Create a new multimedia entry
    pub fn multimedia(
        title: impl Into<String>,
        author: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            author,
            Payload::Multimedia {
                media_url: media_url.into(),
            },
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn kind(&self) -> ContentKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Article body, if this is an article
    pub fn body(&self) -> Option<&str> {
        match &self.payload {
            Payload::Article { body } => Some(body),
            Payload::Multimedia { .. } => None,
        }
    }

    /// Media URL, if this is a multimedia entry
    pub fn media_url(&self) -> Option<&str> {
        match &self.payload {
            Payload::Multimedia { media_url } => Some(media_url),
            Payload::Article { .. } => None,
        }
    }

    /// Record a single view
    pub fn record_view(&mut self) {
        self.views += 1;
    }

    /// Record a single like
    pub fn record_like(&mut self) {
        self.likes += 1;
    }

    /// Append a comment. Empty and repeated comments are kept as-is.
    pub fn add_comment(&mut self, text: impl Into<String>) {
        self.comments.push(text.into());
    }

    /// Comments in insertion order
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Current engagement counters
    pub fn popularity(&self) -> Popularity {
        Popularity {
            views: self.views,
            likes: self.likes,
            comment_count: self.comments.len(),
        }
    }

    /// Human-readable summary using the default display settings
    pub fn describe(&self) -> String {
        self.describe_with(&DisplaySettings::default())
    }

    /// Human-readable summary.
    ///
    /// Articles show a preview of the first `preview_chars` characters of the
    /// body followed by the ellipsis marker, whether or not the body was cut.
    /// Multimedia entries show the full media URL.
    pub fn describe_with(&self, display: &DisplaySettings) -> String {
        match &self.payload {
            Payload::Article { body } => {
                let preview: String = body.chars().take(display.preview_chars).collect();
                format!(
                    "Article: {} by {}\n{}{}",
                    self.title, self.author, preview, display.ellipsis
                )
            }
            Payload::Multimedia { media_url } => format!(
                "Multimedia: {} by {}\nMedia URL: {}",
                self.title, self.author, media_url
            ),
        }
    }

    /// Overwrite title, author and payload from `other`.
    ///
    /// Callers must pass an item of the same kind; [`Catalog::update`] checks
    /// this. A payload of a different kind is ignored here so the item's kind
    /// stays fixed. Counters and comments are never touched.
    ///
    /// [`Catalog::update`]: super::Catalog::update
    pub fn apply_update(&mut self, other: ContentItem) {
        self.title = other.title;
        self.author = other.author;

        match (&mut self.payload, other.payload) {
            (Payload::Article { body }, Payload::Article { body: new_body }) => {
                *body = new_body;
            }
            (Payload::Multimedia { media_url }, Payload::Multimedia { media_url: new_url }) => {
                *media_url = new_url;
            }
            _ => {}
        }
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
