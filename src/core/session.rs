//! Replays scripts against a catalog.
//!
//! Each step runs to completion before the next one starts. Catalog failures
//! (missing titles, kind mismatches) are reported and the session moves on;
//! only output errors abort a run.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::DisplaySettings;
use crate::library::{Catalog, CatalogError, PopularityEntry};

use super::script::{Script, Step};

/// Drives a catalog through script steps
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    display: DisplaySettings,
}

impl Session {
    /// Create a session over an empty catalog
    pub fn new(display: DisplaySettings) -> Self {
        Self {
            catalog: Catalog::new(),
            display,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run every step of `script`, writing observable output to `out`
    #[instrument(skip(self, script, out), fields(script = %script.name))]
    pub fn run<W: Write>(&mut self, script: &Script, out: &mut W) -> Result<SessionReport> {
        info!(steps = script.steps.len(), "Starting script");

        let mut report = SessionReport {
            script: script.name.clone(),
            steps_run: 0,
            failures: Vec::new(),
        };

        for (index, step) in script.steps.iter().enumerate() {
            debug!(step = index, op = step.op(), "Running step");

            if let Err(error) = self.apply(step, out)? {
                warn!(step = index, op = step.op(), %error, "Step failed");
                report.failures.push(StepFailure {
                    step: index,
                    op: step.op(),
                    error,
                });
            }
            self.flush_events(out)?;
            report.steps_run += 1;
        }

        info!(
            steps_run = report.steps_run,
            failures = report.failures.len(),
            "Script finished"
        );
        Ok(report)
    }

    /// Apply one step. The outer result carries output errors, the inner one
    /// the catalog outcome.
    fn apply<W: Write>(&mut self, step: &Step, out: &mut W) -> Result<Result<(), CatalogError>> {
        let outcome = match step {
            Step::Add { item } => {
                self.catalog.add(item.clone().into_item());
                Ok(())
            }
            Step::View { title, times } => self.catalog.find_mut(title).map(|item| {
                for _ in 0..*times {
                    item.record_view();
                }
            }),
            Step::Like { title, times } => self.catalog.find_mut(title).map(|item| {
                for _ in 0..*times {
                    item.record_like();
                }
            }),
            Step::Comment { title, text } => self
                .catalog
                .find_mut(title)
                .map(|item| item.add_comment(text.clone())),
            Step::Update { title, with } => self.catalog.update(title, with.clone().into_item()),
            Step::Delete { title } => self.catalog.delete(title).map(|_| ()),
            Step::Search { query } => {
                self.write_search(query, out)?;
                Ok(())
            }
            Step::List => {
                self.write_listing(out)?;
                Ok(())
            }
            Step::Report => {
                self.write_report(out)?;
                Ok(())
            }
        };

        Ok(outcome)
    }

    /// Write one summary per item
    pub fn write_listing<W: Write>(&self, out: &mut W) -> Result<()> {
        for item in self.catalog.list_all() {
            writeln!(out, "{}", item.describe_with(&self.display))
                .context("Failed to write listing")?;
        }
        Ok(())
    }

    /// Write summaries of the items matching `query`
    pub fn write_search<W: Write>(&self, query: &str, out: &mut W) -> Result<()> {
        let matches = self.catalog.search(query);
        debug!(%query, matches = matches.len(), "Search");
        for item in matches {
            writeln!(out, "{}", item.describe_with(&self.display))
                .context("Failed to write search results")?;
        }
        Ok(())
    }

    /// Write one popularity line per item
    pub fn write_report<W: Write>(&self, out: &mut W) -> Result<()> {
        for entry in self.catalog.popularity_report() {
            writeln!(out, "{}", entry).context("Failed to write popularity report")?;
        }
        Ok(())
    }

    /// Final popularity report as data
    pub fn popularity(&self) -> Vec<PopularityEntry> {
        self.catalog.popularity_report().collect()
    }

    fn flush_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for event in self.catalog.take_events() {
            writeln!(out, "{}", event.summary).context("Failed to write notification")?;
        }
        Ok(())
    }
}

/// Outcome of a script run
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Script name
    pub script: String,

    /// Number of steps executed
    pub steps_run: usize,

    /// Steps the catalog rejected
    pub failures: Vec<StepFailure>,
}

impl SessionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A step the catalog rejected
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// Index of the step within the script
    pub step: usize,

    /// Operation name
    pub op: &'static str,

    /// Why it was rejected
    #[serde(serialize_with = "serialize_display")]
    pub error: CatalogError,
}

fn serialize_display<S: serde::Serializer>(
    error: &CatalogError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
