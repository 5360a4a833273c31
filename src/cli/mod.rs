//! Command-line interface for cms.
//!
//! Provides commands for running catalog scripts, validating them,
//! replaying the built-in walkthrough and inspecting configuration.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config;
use crate::core::{Script, Session, SessionReport};

/// cms - In-memory content catalog
#[derive(Parser, Debug)]
#[command(name = "cms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay the built-in walkthrough
    Demo,

    /// Run a catalog script
    Run {
        /// Script file (YAML)
        script: PathBuf,

        /// Print the final popularity report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a script without running it
    Validate {
        /// Script file (YAML)
        script: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Demo => run_script(Script::walkthrough()?, false),
            Commands::Run { script, json } => run_script(load_script(&script)?, json),
            Commands::Validate { script } => validate_script(&script),
            Commands::Config => show_config(),
        }
    }
}

fn load_script(path: &Path) -> Result<Script> {
    let script = Script::from_file(path)?;
    script
        .validate()
        .with_context(|| format!("Invalid script: {}", path.display()))?;
    Ok(script)
}

/// Run a script against a fresh catalog
fn run_script(script: Script, json: bool) -> Result<()> {
    let display = config::config()?.display.clone();
    let mut session = Session::new(display);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = session.run(&script, &mut out)?;

    if json {
        let entries = session.popularity();
        serde_json::to_writer_pretty(&mut out, &entries)
            .context("Failed to write popularity JSON")?;
        writeln!(out)?;
    }

    print_summary(&report, session.catalog().len());
    Ok(())
}

fn print_summary(report: &SessionReport, remaining: usize) {
    if report.is_clean() {
        eprintln!(
            "\n[Script '{}' ran {} steps, {} items in catalog]",
            report.script, report.steps_run, remaining
        );
    } else {
        eprintln!(
            "\n[Script '{}' ran {} steps, {} rejected, {} items in catalog]",
            report.script,
            report.steps_run,
            report.failures.len(),
            remaining
        );
        for failure in &report.failures {
            eprintln!("  step {} ({}): {}", failure.step, failure.op, failure.error);
        }
    }
}

/// Validate a script file
fn validate_script(path: &Path) -> Result<()> {
    let script = load_script(path)?;
    println!(
        "Script '{}' is valid ({} steps)",
        script.name,
        script.steps.len()
    );
    if !script.description.is_empty() {
        println!("  {}", script.description);
    }
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let resolved = config::config()?;

    match &resolved.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }
    println!("Preview chars: {}", resolved.display.preview_chars);
    println!("Ellipsis: {:?}", resolved.display.ellipsis);
    Ok(())
}
