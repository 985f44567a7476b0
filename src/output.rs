//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::path::PathBuf;

use serde::Serialize;

use crate::models::ResolvedFileSet;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a resolve operation
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    /// Resolved files, in scan order
    pub files: Vec<String>,
    /// Number of resolved files
    pub count: usize,
    /// Number of declarations that were resolved
    pub declarations: usize,
    /// Configuration files the declarations came from
    pub sources: Vec<String>,
}

/// Result of a configuration check
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Whether every declaration is valid
    pub valid: bool,
    /// Number of declarations
    pub declarations: usize,
    /// Number of patterns across all declarations
    pub patterns: usize,
    /// Configuration files that were checked
    pub sources: Vec<String>,
    /// First problem found, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

impl ResolveReport {
    /// Build a report from a resolution result
    #[must_use]
    pub fn new(files: &ResolvedFileSet, declarations: usize, sources: &[PathBuf]) -> Self {
        Self {
            files: display_paths(files.as_slice()),
            count: files.len(),
            declarations,
            sources: display_paths(sources),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for file in &self.files {
            println!("{file}");
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl CheckReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for source in &self.sources {
            println!("  {source}");
        }
        match &self.error {
            None => println!(
                "OK: {} declaration(s), {} pattern(s)",
                self.declarations, self.patterns
            ),
            Some(error) => println!("INVALID: {error}"),
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
