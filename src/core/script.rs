//! Script definitions and loading.
//!
//! Scripts are defined in YAML and consist of ordered catalog operations.
//! A script is replayed against a fresh catalog by a [`Session`].
//!
//! [`Session`]: super::Session

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::{ContentItem, Payload};

/// Built-in walkthrough shipped with the binary
pub const WALKTHROUGH_YAML: &str = include_str!("../../demos/walkthrough.yaml");

/// A complete script definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Script name (shown in logs)
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Ordered list of operations to run
    pub steps: Vec<Step>,
}

impl Script {
    /// Load a script from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {}", path.display()))?;

        Self::from_yaml(&content)
    }

    /// Parse a script from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse script YAML")
    }

    /// The built-in walkthrough script
    pub fn walkthrough() -> Result<Self> {
        Self::from_yaml(WALKTHROUGH_YAML)
    }

    /// Validate the script definition
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.name.trim().is_empty() {
            return Err(ScriptError::EmptyName);
        }

        if self.steps.is_empty() {
            return Err(ScriptError::NoSteps);
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::View { times, .. } | Step::Like { times, .. } if *times == 0 => {
                    return Err(ScriptError::ZeroRepeat { step: index });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Script validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Script name cannot be empty")]
    EmptyName,

    #[error("Script must have at least one step")]
    NoSteps,

    #[error("Step {step} repeats zero times")]
    ZeroRepeat { step: usize },
}

/// A single catalog operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Register a new item
    Add { item: Draft },

    /// Record views on an item
    View {
        title: String,
        #[serde(default = "default_times")]
        times: u32,
    },

    /// Record likes on an item
    Like {
        title: String,
        #[serde(default = "default_times")]
        times: u32,
    },

    /// Post a comment on an item
    Comment { title: String, text: String },

    /// Replace title/author/payload of an item
    Update { title: String, with: Draft },

    /// Remove an item
    Delete { title: String },

    /// Print summaries of items whose title or author contains `query`
    Search { query: String },

    /// Print every item's summary
    List,

    /// Print the popularity report
    Report,
}

impl Step {
    /// Short operation name for logs
    pub fn op(&self) -> &'static str {
        match self {
            Step::Add { .. } => "add",
            Step::View { .. } => "view",
            Step::Like { .. } => "like",
            Step::Comment { .. } => "comment",
            Step::Update { .. } => "update",
            Step::Delete { .. } => "delete",
            Step::Search { .. } => "search",
            Step::List => "list",
            Step::Report => "report",
        }
    }
}

fn default_times() -> u32 {
    1
}

/// Content described in a script, turned into a fresh [`ContentItem`] when run
///
/// ```yaml
/// kind: article
/// title: Understanding AI
/// author: Alice
/// body: This is an article about AI.
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub author: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Draft {
    pub fn into_item(self) -> ContentItem {
        ContentItem::new(self.title, self.author, self.payload)
    }
}
