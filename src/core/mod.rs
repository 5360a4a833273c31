//! Scripted catalog sessions.
//!
//! This module contains:
//! - Script: YAML definitions of ordered catalog operations
//! - Session: Replays a script against a catalog

pub mod script;
pub mod session;

// Re-export commonly used types
pub use script::{Draft, Script, ScriptError, Step, WALKTHROUGH_YAML};
pub use session::{Session, SessionReport, StepFailure};
